use crate::{BucketLocation, S3Storage, StaticCredentials, Storage, StorageResult};
use clouddrive_core::Config;
use std::sync::Arc;

/// Create the storage backend from configuration.
///
/// Returns `Ok(None)` when no bucket is configured: the server still starts, and
/// endpoints that need the bucket report a configuration error instead.
pub async fn create_storage(config: &Config) -> StorageResult<Option<Arc<dyn Storage>>> {
    let Some(bucket) = config.s3_bucket() else {
        return Ok(None);
    };

    let location = BucketLocation::new(bucket, config.aws_region())
        .with_endpoint(config.s3_endpoint().map(String::from));

    let storage_config = config.storage();
    let credentials = match (
        &storage_config.aws_access_key_id,
        &storage_config.aws_secret_access_key,
    ) {
        (Some(id), Some(secret)) => Some(StaticCredentials {
            access_key_id: id.clone(),
            secret_access_key: secret.clone(),
        }),
        _ => None,
    };

    let storage = S3Storage::new(location, credentials).await?;
    Ok(Some(Arc::new(storage)))
}
