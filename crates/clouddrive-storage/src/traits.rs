//! Storage abstraction trait
//!
//! This module defines the Storage trait that object-store backends implement.

use crate::location::BucketLocation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
///
/// Each variant carries the upstream message unchanged so callers can surface it
/// verbatim.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StorageError {
    /// The underlying failure message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            StorageError::PresignFailed(msg)
            | StorageError::ListFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::InvalidKey(msg)
            | StorageError::ConfigError(msg) => msg,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One entry of a listing, as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// Storage abstraction trait
///
/// Implementations are owned by the request-handling context and injected into it;
/// nothing here is process-global.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Bucket, region and endpoint this store talks to.
    fn location(&self) -> &BucketLocation;

    /// Canonical public URL of an object. No request is made.
    fn public_url(&self, storage_key: &str) -> String {
        self.location().object_url(storage_key)
    }

    /// Generate a presigned PUT URL for a direct upload to `storage_key`.
    ///
    /// Does not create or reserve the object.
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Generate a presigned GET URL. The key is not checked for existence.
    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// List at most `max_keys` objects under `prefix`, in store order.
    async fn list(&self, prefix: &str, max_keys: usize) -> StorageResult<Vec<ObjectInfo>>;

    /// Delete an object. Deleting a missing key succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;
}
