//! Backend stores for instance records.
//!
//! Both realizations share one contract: `put` inserts or replaces, `remove`
//! of an absent id is not an error, and `list_ids` order is unspecified.

use async_trait::async_trait;
use thiserror::Error;

use crate::instance::InstanceRecord;

pub mod memory;
pub mod seaorm;

pub use memory::MemoryInstanceStore;
pub use seaorm::SeaOrmInstanceStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage medium the registry delegates to, keyed by instance id.
#[async_trait]
pub trait InstanceStore: Send + Sync {
    async fn put(&self, record: InstanceRecord) -> Result<(), StoreError>;
    /// Returns whether a record was present.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;
    async fn get(&self, id: &str) -> Result<Option<InstanceRecord>, StoreError>;
    async fn list_ids(&self) -> Result<Vec<String>, StoreError>;
}
