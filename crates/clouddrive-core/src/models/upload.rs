use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client-declared description of a file it intends to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileDescriptor {
    /// Original filename
    pub name: String,
    /// Declared MIME type (may be empty)
    #[serde(rename = "type", default)]
    pub content_type: String,
    /// Declared size in bytes
    #[serde(default)]
    pub size: u64,
}

/// Request a batch of presigned upload URLs
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PresignedUrlsRequest {
    #[serde(default)]
    pub files: Vec<FileDescriptor>,
}

/// One issued upload slot. Position in the response matches the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    pub original_name: String,
    /// Generated unique filename (`<basename>-<uuid><ext>`)
    pub file_name: String,
    /// Presigned PUT URL, valid for five minutes
    pub presigned_url: String,
    pub s3_key: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlsResponse {
    pub message: String,
    pub presigned_data: Vec<PresignedUpload>,
    pub count: usize,
}

/// Advisory confirmation sent after a successful direct PUT
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadRequest {
    #[serde(default)]
    pub s3_key: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub content_type: String,
}

impl From<&PresignedUpload> for ConfirmUploadRequest {
    fn from(slot: &PresignedUpload) -> Self {
        Self {
            s3_key: slot.s3_key.clone(),
            original_name: slot.original_name.clone(),
            file_name: slot.file_name.clone(),
            size: slot.size,
            content_type: slot.content_type.clone(),
        }
    }
}

/// Display record for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub original_name: String,
    pub file_name: String,
    /// Public object URL
    pub url: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadResponse {
    pub message: String,
    pub uploaded_file: UploadedFile,
}
