use std::sync::Arc;
use std::time::{Duration, Instant};

use super::store::Store;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct ServiceState {
    store: Store,
    api_key: Option<Arc<str>>,
    started_at: Instant,
}

impl ServiceState {
    pub fn new(store: Store, api_key: Option<String>) -> Self {
        Self {
            store,
            api_key: api_key.map(Arc::from),
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
