use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display record for one stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Full storage key
    pub key: String,
    /// Substring after the last `/` of the key
    pub file_name: String,
    /// Public object URL
    pub url: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListFilesResponse {
    pub message: String,
    pub files: Vec<FileEntry>,
    pub count: usize,
}

/// Body for download-url and delete-file. `key` stays optional so an absent key
/// reaches validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct KeyRequest {
    #[serde(default)]
    pub key: Option<String>,
}

impl KeyRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlResponse {
    pub message: String,
    pub download_url: String,
    /// Seconds until the URL expires
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileResponse {
    pub message: String,
    pub deleted_key: String,
}
