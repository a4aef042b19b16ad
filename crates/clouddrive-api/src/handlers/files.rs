use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::validation;
use axum::{extract::State, response::IntoResponse, Json};
use clouddrive_core::constants::{DOWNLOAD_URL_EXPIRY_SECS, LIST_MAX_KEYS, UPLOAD_PREFIX};
use clouddrive_core::models::{
    DeleteFileResponse, DownloadUrlResponse, FileEntry, KeyRequest, ListFilesResponse,
};
use clouddrive_storage::file_name_from_key;
use std::sync::Arc;
use std::time::Duration;

/// List uploaded files
#[utoipa::path(
    get,
    path = "/list-files",
    tag = "files",
    responses(
        (status = 200, description = "Files retrieved", body = ListFilesResponse),
        (status = 500, description = "Bucket not configured or listing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_files"))]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let storage = state.storage()?;
    let objects = storage.list(UPLOAD_PREFIX, LIST_MAX_KEYS).await?;

    let files: Vec<FileEntry> = objects
        .into_iter()
        .map(|object| FileEntry {
            file_name: file_name_from_key(&object.key).to_string(),
            url: storage.public_url(&object.key),
            key: object.key,
            size: object.size,
            last_modified: object.last_modified,
            etag: object.etag,
        })
        .collect();

    Ok(Json(ListFilesResponse {
        message: "Files retrieved successfully".to_string(),
        count: files.len(),
        files,
    }))
}

/// Generate a presigned download URL, valid for one hour
#[utoipa::path(
    post,
    path = "/download-url",
    tag = "files",
    request_body = KeyRequest,
    responses(
        (status = 200, description = "Download URL generated", body = DownloadUrlResponse),
        (status = 400, description = "File key is required", body = ErrorResponse),
        (status = 500, description = "Signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "download_url"))]
pub async fn download_url(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<KeyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let key = validation::require_key(request.key.as_deref())?;
    let download_url = state
        .storage()?
        .get_presigned_url(key, Duration::from_secs(DOWNLOAD_URL_EXPIRY_SECS))
        .await?;

    Ok(Json(DownloadUrlResponse {
        message: "Download URL generated successfully".to_string(),
        download_url,
        expires_in: DOWNLOAD_URL_EXPIRY_SECS,
    }))
}

/// Delete a file. Deleting a missing key also succeeds.
#[utoipa::path(
    delete,
    path = "/delete-file",
    tag = "files",
    request_body = KeyRequest,
    responses(
        (status = 200, description = "File deleted", body = DeleteFileResponse),
        (status = 400, description = "File key is required", body = ErrorResponse),
        (status = 500, description = "Deletion failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<KeyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let key = validation::require_key(request.key.as_deref())?;
    state.storage()?.delete(key).await?;

    tracing::info!(key = %key, "File deleted");

    Ok(Json(DeleteFileResponse {
        message: "File deleted successfully".to_string(),
        deleted_key: key.to_string(),
    }))
}
