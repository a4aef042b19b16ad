//! Domain methods for the CloudDrive API client.

use crate::ApiClient;
use anyhow::{Context, Result};
use bytes::Bytes;
use clouddrive_core::models::{
    ConfirmUploadRequest, ConfirmUploadResponse, DeleteFileResponse, DownloadUrlResponse,
    FileDescriptor, HealthResponse, KeyRequest, ListFilesResponse, PresignedUrlsRequest,
    PresignedUrlsResponse, ServiceInfo,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

impl ApiClient {
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        self.get("/").await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/health").await
    }

    /// Request one presigned PUT URL per descriptor, in order.
    pub async fn generate_presigned_urls(
        &self,
        files: &[FileDescriptor],
    ) -> Result<PresignedUrlsResponse> {
        let body = PresignedUrlsRequest {
            files: files.to_vec(),
        };
        self.post_json("/generate-presigned-urls", &body).await
    }

    pub async fn confirm_upload(
        &self,
        request: &ConfirmUploadRequest,
    ) -> Result<ConfirmUploadResponse> {
        self.post_json("/confirm-upload", request).await
    }

    pub async fn list_files(&self) -> Result<ListFilesResponse> {
        self.get("/list-files").await
    }

    pub async fn download_url(&self, key: &str) -> Result<DownloadUrlResponse> {
        self.post_json("/download-url", &KeyRequest::new(key)).await
    }

    pub async fn delete_file(&self, key: &str) -> Result<DeleteFileResponse> {
        self.delete_json("/delete-file", &KeyRequest::new(key)).await
    }

    /// PUT raw bytes to a presigned URL. Returns the storage service's status;
    /// only transport failures are errors.
    pub async fn put_object(
        &self,
        presigned_url: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StatusCode> {
        let mut request = self.client().put(presigned_url).body(data);
        if !content_type.is_empty() {
            request = request.header(CONTENT_TYPE, content_type);
        }

        let response = request.send().await.context("Failed to reach storage")?;

        Ok(response.status())
    }

    /// GET an object through a presigned URL.
    pub async fn fetch_object(&self, presigned_url: &str) -> Result<Bytes> {
        let response = self
            .client()
            .get(presigned_url)
            .send()
            .await
            .context("Failed to reach storage")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Storage request failed with status {}", status));
        }

        response
            .bytes()
            .await
            .context("Failed to read object body")
    }
}
