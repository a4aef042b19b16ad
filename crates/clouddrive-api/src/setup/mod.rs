//! Application setup and initialization
//!
//! Kept out of main.rs so tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::Result;
use clouddrive_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Missing storage settings are reported, never fatal
    validation::warn_missing_env(&config);

    let storage = storage::setup_storage(&config).await?;
    let state = Arc::new(AppState::new(config.clone(), storage));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
