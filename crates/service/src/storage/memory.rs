use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{InstanceStore, StoreError};
use crate::instance::InstanceRecord;

#[derive(Default)]
struct Inner {
    records: HashMap<String, InstanceRecord>,
    // insertion order of live ids
    order: Vec<String>,
}

/// Volatile in-process store. Contents are lost on restart; operations never fail.
#[derive(Default)]
pub struct MemoryInstanceStore {
    inner: RwLock<Inner>,
}

impl MemoryInstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl InstanceStore for MemoryInstanceStore {
    async fn put(&self, record: InstanceRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let id = record.id.clone();
        if inner.records.insert(id.clone(), record).is_none() {
            inner.order.push(id);
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let existed = inner.records.remove(id).is_some();
        if existed {
            inner.order.retain(|k| k != id);
        }
        Ok(existed)
    }

    async fn get(&self, id: &str) -> Result<Option<InstanceRecord>, StoreError> {
        Ok(self.inner.read().await.records.get(id).cloned())
    }

    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.inner.read().await.order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_remove() -> Result<(), anyhow::Error> {
        let store = MemoryInstanceStore::new();
        assert!(store.is_empty().await);

        store.put(InstanceRecord::new("i-1", "create").with_name("web1")).await?;
        let got = store.get("i-1").await?.expect("present");
        assert_eq!(got.name.as_deref(), Some("web1"));

        assert!(store.remove("i-1").await?);
        assert!(store.get("i-1").await?.is_none());
        assert!(!store.remove("i-1").await?);
        Ok(())
    }

    #[tokio::test]
    async fn put_replaces_without_duplicating_id() -> Result<(), anyhow::Error> {
        let store = MemoryInstanceStore::new();
        store.put(InstanceRecord::new("i-1", "create").with_name("a")).await?;
        store.put(InstanceRecord::new("i-1", "create").with_name("b")).await?;

        assert_eq!(store.list_ids().await?, vec!["i-1".to_string()]);
        assert_eq!(store.get("i-1").await?.unwrap().name.as_deref(), Some("b"));
        Ok(())
    }

    #[tokio::test]
    async fn list_ids_follows_insertion_order() -> Result<(), anyhow::Error> {
        let store = MemoryInstanceStore::new();
        for id in ["c", "a", "b"] {
            store.put(InstanceRecord::new(id, "create")).await?;
        }
        store.remove("a").await?;
        store.put(InstanceRecord::new("a", "create")).await?;

        assert_eq!(store.list_ids().await?, vec!["c", "b", "a"]);
        Ok(())
    }
}
