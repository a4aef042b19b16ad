//! Application state shared by all handlers.

use clouddrive_core::{AppError, Config};
use clouddrive_storage::Storage;
use std::sync::Arc;

/// Request-handling context. Handlers hold no other shared state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    storage: Option<Arc<dyn Storage>>,
}

impl AppState {
    pub fn new(config: Config, storage: Option<Arc<dyn Storage>>) -> Self {
        Self { config, storage }
    }

    /// The configured store, or a configuration error when no bucket is set.
    pub fn storage(&self) -> Result<&Arc<dyn Storage>, AppError> {
        self.storage
            .as_ref()
            .ok_or_else(|| AppError::Configuration("S3 bucket name not configured".to_string()))
    }
}
