//! Request and response schemas for every HTTP endpoint.
//!
//! Field names follow the camelCase wire format the browser client speaks.

pub mod files;
pub mod system;
pub mod upload;

pub use files::{DeleteFileResponse, DownloadUrlResponse, FileEntry, KeyRequest, ListFilesResponse};
pub use system::{HealthResponse, ServiceInfo};
pub use upload::{
    ConfirmUploadRequest, ConfirmUploadResponse, FileDescriptor, PresignedUpload,
    PresignedUrlsRequest, PresignedUrlsResponse, UploadedFile,
};
