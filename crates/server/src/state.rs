use std::sync::Arc;

use service::{storage::InstanceStore, Registry};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(store: Arc<dyn InstanceStore>) -> Self {
        Self { registry: Arc::new(Registry::new(store)) }
    }
}
