//! HTTP client for the CloudDrive API.
//!
//! Provides a minimal client with generic JSON helpers, domain methods (presign,
//! confirm, list, download, delete), direct-to-storage transfer, and the client-side
//! state the CLI drives: file selection, the upload state machine, the directory
//! view and status messages.

pub mod api;
pub mod drive;
pub mod format;
pub mod selection;
pub mod status;
pub mod upload;
pub mod view;

use anyhow::{Context, Result};
use clouddrive_core::constants::DEFAULT_API_URL;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// Non-success answer from the API. `message` is the server's `error` field when
/// the body carries one, otherwise the raw body text.
#[derive(Debug, thiserror::Error)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Message suitable for a status line: the server's own error text for API
/// failures, the full cause chain otherwise.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api) => api.message.clone(),
        None => format!("{:#}", err),
    }
}

/// True when the failure came back from the server rather than the transport.
pub fn is_api_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>().is_some()
}

/// HTTP client for the CloudDrive API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: CLOUDDRIVE_API_URL (or API_URL).
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CLOUDDRIVE_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.build_url(path))
            .send()
            .await
            .context("Failed to send request")?;

        parse_response(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.build_url(path))
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        parse_response(response).await
    }

    /// DELETE with a JSON body and deserialize response.
    pub async fn delete_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .delete(self.build_url(path))
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        parse_response(response).await
    }

    /// Raw client for requests outside the API (presigned storage URLs).
    pub fn client(&self) -> &Client {
        &self.client
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError {
            status,
            message: extract_error(&error_text),
        }
        .into());
    }

    response
        .json()
        .await
        .context("Failed to parse response as JSON")
}

fn extract_error(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}

// Re-export commonly used types
pub use drive::Drive;
pub use selection::{FileSelection, PendingFile};
pub use status::{StatusKind, StatusLog, StatusMessage};
pub use upload::{OrphanPolicy, UploadBatch, UploadError, UploadFailure, UploadReport, UploadState};
pub use view::{DirectoryView, FilePreview, ViewMode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_preferred() {
        assert_eq!(extract_error(r#"{"error":"No files provided"}"#), "No files provided");
        assert_eq!(extract_error("gateway timeout"), "gateway timeout");
        assert_eq!(extract_error(r#"{"message":"x"}"#), r#"{"message":"x"}"#);
    }

    #[test]
    fn api_error_message_is_unwrapped() {
        let err: anyhow::Error = ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "File key is required".to_string(),
        }
        .into();
        assert!(is_api_error(&err));
        assert_eq!(error_message(&err), "File key is required");

        let other = anyhow::anyhow!("connection refused").context("Failed to send request");
        assert!(!is_api_error(&other));
        assert_eq!(
            error_message(&other),
            "Failed to send request: connection refused"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.build_url("/health"), "http://localhost:3000/health");
    }
}
