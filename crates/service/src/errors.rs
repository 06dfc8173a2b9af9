use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("instance not found: {0}")]
    NotFound(String),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => Self::BackendUnavailable(msg),
        }
    }
}
