//! Instance registry: interprets phone-home events and applies them to a store.
//!
//! Mutations are serialized per instance id through a lock table, so two
//! events for the same id never interleave while events for different ids
//! proceed in parallel. Reads go straight to the store, whose operations are
//! individually atomic.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::errors::RegistryError;
use crate::instance::{EventName, InstanceRecord, RESULT_SUCCESS};
use crate::metrics;
use crate::storage::{InstanceStore, StoreError};

pub struct Registry {
    store: Arc<dyn InstanceStore>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Registry {
    pub fn new(store: Arc<dyn InstanceStore>) -> Self {
        Self { store, locks: DashMap::new() }
    }

    /// Apply one lifecycle event and return what the caller should see.
    ///
    /// - `create`: stores the record with `result = "success"` (overwriting any prior one).
    /// - `delete`: removes the record; deleting an unknown id is a no-op.
    /// - anything else: no mutation, the event is echoed back.
    ///
    /// Any caller-supplied `result` is dropped first. Store failures surface
    /// as `BackendUnavailable` without retry.
    #[instrument(skip(self, event), fields(id = %event.id, event = %event.event_name))]
    pub async fn apply(&self, mut event: InstanceRecord) -> Result<InstanceRecord, RegistryError> {
        event.result = None;

        match event.event_name {
            EventName::Create => {
                event.result = Some(RESULT_SUCCESS.to_string());
                let record = event.clone();
                self.with_id_lock(&event.id, || self.store.put(record))
                    .await
                    .map_err(backend_failure)?;
                info!(name = ?event.name, "created instance");
            }
            EventName::Delete => {
                let existed = self
                    .with_id_lock(&event.id, || self.store.remove(&event.id))
                    .await
                    .map_err(backend_failure)?;
                info!(existed, "deleted instance");
            }
            EventName::Other(_) => {
                debug!("unrecognized event name; passing through");
            }
        }
        metrics::EVENTS_TOTAL
            .with_label_values(&[metrics::event_label(&event.event_name)])
            .inc();
        Ok(event)
    }

    /// Point lookup; `NotFound` when no record exists for `id`.
    pub async fn lookup(&self, id: &str) -> Result<InstanceRecord, RegistryError> {
        let found = self.store.get(id).await.map_err(backend_failure)?;
        found.ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// All currently known ids. Order is unspecified.
    pub async fn enumerate(&self) -> Result<Vec<String>, RegistryError> {
        let ids = self.store.list_ids().await.map_err(backend_failure)?;
        metrics::KNOWN_INSTANCES.set(ids.len() as i64);
        debug!(count = ids.len(), "listed instance ids");
        Ok(ids)
    }

    /// Run `op` while holding the lock for `id`. The table entry is dropped
    /// once nobody else holds or waits on it, including when the returned
    /// future is cancelled mid-flight.
    async fn with_id_lock<F, Fut, T>(&self, id: &str, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        // Locals drop in reverse order: guard, then our Arc, then the prune.
        let _prune = PruneOnDrop { locks: &self.locks, id };
        let lock = self.locks.entry(id.to_string()).or_default().clone();
        let _guard = lock.lock().await;
        op().await
    }

    #[cfg(test)]
    fn lock_table_len(&self) -> usize {
        self.locks.len()
    }
}

/// Removes the lock table entry for `id` on drop unless another task still
/// holds a reference to it.
struct PruneOnDrop<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    id: &'a str,
}

impl Drop for PruneOnDrop<'_> {
    fn drop(&mut self) {
        self.locks.remove_if(self.id, |_, l| Arc::strong_count(l) == 1);
    }
}

fn backend_failure(e: StoreError) -> RegistryError {
    metrics::BACKEND_ERRORS_TOTAL.inc();
    error!(error = %e, "backend store operation failed");
    e.into()
}
