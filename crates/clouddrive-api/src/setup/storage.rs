//! Storage setup and initialization

use anyhow::{Context, Result};
use clouddrive_core::Config;
use clouddrive_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the S3 store, or `None` when no bucket is configured.
pub async fn setup_storage(config: &Config) -> Result<Option<Arc<dyn Storage>>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize S3 storage")?;

    match storage {
        Some(ref store) => {
            let location = store.location();
            tracing::info!(
                bucket = %location.bucket,
                region = %location.region,
                endpoint = ?location.endpoint,
                "Storage initialized"
            );
        }
        None => {
            tracing::warn!("S3 bucket not configured; storage endpoints will return errors");
        }
    }

    Ok(storage)
}
