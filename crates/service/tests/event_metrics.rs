//! Runs in its own test binary so the process-global counters see only
//! the events issued here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use service::errors::RegistryError;
use service::metrics::EVENTS_TOTAL;
use service::storage::{InstanceStore, MemoryInstanceStore, StoreError};
use service::{InstanceRecord, Registry};

/// Fails every mutation while `down` is set, otherwise delegates to memory.
#[derive(Default)]
struct FlakyStore {
    down: AtomicBool,
    inner: MemoryInstanceStore,
}

impl FlakyStore {
    fn check(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InstanceStore for FlakyStore {
    async fn put(&self, record: InstanceRecord) -> Result<(), StoreError> {
        self.check()?;
        self.inner.put(record).await
    }
    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.remove(id).await
    }
    async fn get(&self, id: &str) -> Result<Option<InstanceRecord>, StoreError> {
        self.inner.get(id).await
    }
    async fn list_ids(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list_ids().await
    }
}

fn count(label: &str) -> u64 {
    EVENTS_TOTAL.with_label_values(&[label]).get()
}

#[tokio::test]
async fn only_applied_events_are_counted() -> Result<(), anyhow::Error> {
    let store = Arc::new(FlakyStore::default());
    let reg = Registry::new(store.clone());

    store.down.store(true, Ordering::SeqCst);
    for ev in ["create", "delete"] {
        let res = reg.apply(InstanceRecord::new("i-1", ev)).await;
        assert!(matches!(res, Err(RegistryError::BackendUnavailable(_))));
    }
    assert_eq!(count("create"), 0);
    assert_eq!(count("delete"), 0);

    store.down.store(false, Ordering::SeqCst);
    reg.apply(InstanceRecord::new("i-1", "create")).await?;
    reg.apply(InstanceRecord::new("i-1", "delete")).await?;
    reg.apply(InstanceRecord::new("i-1", "reboot")).await?;
    assert_eq!(count("create"), 1);
    assert_eq!(count("delete"), 1);
    assert_eq!(count("other"), 1);
    Ok(())
}
