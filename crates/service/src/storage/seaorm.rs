use async_trait::async_trait;
use models::{errors::ModelError, instance};
use sea_orm::DatabaseConnection;

use super::{InstanceStore, StoreError};
use crate::instance::InstanceRecord;

/// Postgres-backed store over the `instances` table.
///
/// Only `id`, `event_name`, `name` and `result` are persisted; the remaining
/// record fields read back as `None`.
pub struct SeaOrmInstanceStore {
    pub db: DatabaseConnection,
}

impl SeaOrmInstanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn unavailable(e: ModelError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl From<InstanceRecord> for instance::Model {
    fn from(r: InstanceRecord) -> Self {
        instance::Model {
            instance_id: r.id,
            event_name: r.event_name.into(),
            name: r.name,
            outcome: r.result,
        }
    }
}

impl From<instance::Model> for InstanceRecord {
    fn from(m: instance::Model) -> Self {
        let mut rec = InstanceRecord::new(m.instance_id, m.event_name);
        rec.name = m.name;
        rec.result = m.outcome;
        rec
    }
}

#[async_trait]
impl InstanceStore for SeaOrmInstanceStore {
    async fn put(&self, record: InstanceRecord) -> Result<(), StoreError> {
        instance::upsert(&self.db, record.into()).await.map_err(unavailable)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        instance::delete(&self.db, id).await.map_err(unavailable)
    }

    async fn get(&self, id: &str) -> Result<Option<InstanceRecord>, StoreError> {
        let found = instance::find(&self.db, id).await.map_err(unavailable)?;
        Ok(found.map(InstanceRecord::from))
    }

    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        instance::list_ids(&self.db).await.map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};

    #[test]
    fn only_persisted_fields_survive_the_row_mapping() {
        let mut rec = InstanceRecord::new("i-1", "create").with_name("web1");
        rec.region = Some("eu-west-1".into());
        rec.result = Some("success".into());

        let row: instance::Model = rec.into();
        assert_eq!(row.event_name, "create");
        let back = InstanceRecord::from(row);
        assert_eq!(back.name.as_deref(), Some("web1"));
        assert_eq!(back.result.as_deref(), Some("success"));
        assert!(back.region.is_none());
    }

    #[tokio::test]
    async fn postgres_store_contract() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
            return Ok(());
        }
        let db = models::db::connect().await?;
        Migrator::up(&db, None).await?;
        let store = SeaOrmInstanceStore::new(db);
        let id = format!("i-{}", uuid::Uuid::new_v4());

        store.put(InstanceRecord::new(id.clone(), "create").with_name("web1")).await?;
        assert!(store.list_ids().await?.contains(&id));
        assert_eq!(store.get(&id).await?.unwrap().name.as_deref(), Some("web1"));

        assert!(store.remove(&id).await?);
        assert!(!store.remove(&id).await?);
        assert!(store.get(&id).await?.is_none());
        Ok(())
    }
}
