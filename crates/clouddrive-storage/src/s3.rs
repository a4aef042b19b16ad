use crate::location::BucketLocation;
use crate::traits::{ObjectInfo, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Access key pair supplied through configuration rather than the ambient
/// AWS credential chain.
#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    location: BucketLocation,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `location` - bucket, region and optional custom endpoint
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `credentials` - explicit keys; when `None` the default AWS credential
    ///   chain applies
    pub async fn new(
        location: BucketLocation,
        credentials: Option<StaticCredentials>,
    ) -> StorageResult<Self> {
        if let Some(ref endpoint) = location.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(StorageError::ConfigError(format!(
                    "S3 endpoint must start with http:// or https://: {}",
                    endpoint
                )));
            }
        }

        let region = Region::new(location.region.clone());
        let mut builder = match credentials {
            Some(creds) => aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(Credentials::new(
                    creds.access_key_id,
                    creds.secret_access_key,
                    None,
                    None,
                    "clouddrive-config",
                )),
            None => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        // S3-compatible providers (MinIO etc.) need path-style addressing
        if let Some(ref endpoint) = location.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(S3Storage {
            client: Client::from_conf(builder.build()),
            location,
        })
    }

    fn presigning_config(expires_in: Duration) -> StorageResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::PresignFailed(e.to_string()))
    }
}

/// The service's own message when there is one, the full error chain otherwise.
fn sdk_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    err.message()
        .map(String::from)
        .unwrap_or_else(|| DisplayErrorContext(err).to_string())
}

fn object_info(object: &Object) -> Option<ObjectInfo> {
    let key = object.key()?;
    let last_modified = object
        .last_modified()
        .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()))
        .unwrap_or_default();

    Some(ObjectInfo {
        key: key.to_string(),
        size: object.size().unwrap_or(0).max(0) as u64,
        last_modified,
        etag: object.e_tag().map(String::from),
    })
}

#[async_trait]
impl Storage for S3Storage {
    fn location(&self) -> &BucketLocation {
        &self.location
    }

    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if storage_key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }

        let mut request = self
            .client
            .put_object()
            .bucket(&self.location.bucket)
            .key(storage_key);
        // Signed as a header: the upload must send the same Content-Type
        if !content_type.is_empty() {
            request = request.content_type(content_type);
        }

        let presigned = request
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                let message = sdk_message(&e);
                tracing::error!(
                    error = %message,
                    bucket = %self.location.bucket,
                    key = %storage_key,
                    "S3 PUT presign failed"
                );
                StorageError::PresignFailed(message)
            })?;

        tracing::debug!(
            bucket = %self.location.bucket,
            key = %storage_key,
            content_type = %content_type,
            expires_secs = expires_in.as_secs(),
            "S3 PUT presign generated"
        );

        Ok(presigned.uri().to_string())
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if storage_key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }

        let presigned = self
            .client
            .get_object()
            .bucket(&self.location.bucket)
            .key(storage_key)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::PresignFailed(sdk_message(&e)))?;

        tracing::debug!(
            bucket = %self.location.bucket,
            key = %storage_key,
            expires_secs = expires_in.as_secs(),
            "S3 GET presign generated"
        );

        Ok(presigned.uri().to_string())
    }

    async fn list(&self, prefix: &str, max_keys: usize) -> StorageResult<Vec<ObjectInfo>> {
        let start = std::time::Instant::now();

        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.location.bucket)
            .prefix(prefix)
            .max_keys(i32::try_from(max_keys).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| {
                let message = sdk_message(&e);
                tracing::error!(
                    error = %message,
                    bucket = %self.location.bucket,
                    prefix = %prefix,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 list failed"
                );
                StorageError::ListFailed(message)
            })?;

        let objects: Vec<ObjectInfo> = output
            .contents()
            .iter()
            .filter_map(object_info)
            .take(max_keys)
            .collect();

        tracing::info!(
            bucket = %self.location.bucket,
            prefix = %prefix,
            count = objects.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 list successful"
        );

        Ok(objects)
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        if storage_key.is_empty() {
            return Err(StorageError::InvalidKey("empty key".to_string()));
        }

        let start = std::time::Instant::now();

        self.client
            .delete_object()
            .bucket(&self.location.bucket)
            .key(storage_key)
            .send()
            .await
            .map_err(|e| {
                let message = sdk_message(&e);
                tracing::error!(
                    error = %message,
                    bucket = %self.location.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                StorageError::DeleteFailed(message)
            })?;

        tracing::info!(
            bucket = %self.location.bucket,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }
}
