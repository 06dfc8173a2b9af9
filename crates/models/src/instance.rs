use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, DatabaseConnection, EntityTrait, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Persisted subset of an instance record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub instance_id: String,
    pub event_name: String,
    pub name: Option<String>,
    #[sea_orm(column_name = "result")]
    pub outcome: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert the row, or overwrite every persisted column if `instance_id` already exists.
pub async fn upsert(db: &DatabaseConnection, model: Model) -> Result<(), ModelError> {
    let am = ActiveModel {
        instance_id: Set(model.instance_id),
        event_name: Set(model.event_name),
        name: Set(model.name),
        outcome: Set(model.outcome),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::InstanceId)
                .update_columns([Column::EventName, Column::Name, Column::Outcome])
                .to_owned(),
        )
        .exec(db)
        .await?;
    Ok(())
}

/// Delete by id; returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, instance_id: &str) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(instance_id.to_owned()).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn find(db: &DatabaseConnection, instance_id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(instance_id.to_owned()).one(db).await?)
}

/// All stored ids, in whatever order the table returns them.
pub async fn list_ids(db: &DatabaseConnection) -> Result<Vec<String>, ModelError> {
    let ids = Entity::find()
        .select_only()
        .column(Column::InstanceId)
        .into_tuple::<String>()
        .all(db)
        .await?;
    Ok(ids)
}
