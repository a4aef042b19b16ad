use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::validation;
use axum::{extract::State, response::IntoResponse, Json};
use clouddrive_core::constants::UPLOAD_URL_EXPIRY_SECS;
use clouddrive_core::models::{
    ConfirmUploadRequest, ConfirmUploadResponse, PresignedUpload, PresignedUrlsRequest,
    PresignedUrlsResponse, UploadedFile,
};
use clouddrive_core::AppError;
use clouddrive_storage::{generate_unique_file_name, upload_key};
use std::sync::Arc;
use std::time::Duration;

/// Generate presigned PUT URLs for a batch of files
///
/// One slot per descriptor, in request order. Any signing failure fails the whole
/// batch and no URLs are returned.
#[utoipa::path(
    post,
    path = "/generate-presigned-urls",
    tag = "uploads",
    request_body = PresignedUrlsRequest,
    responses(
        (status = 200, description = "Presigned URLs generated", body = PresignedUrlsResponse),
        (status = 400, description = "No files provided", body = ErrorResponse),
        (status = 500, description = "Bucket not configured or signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(file_count = request.files.len(), operation = "generate_presigned_urls")
)]
pub async fn generate_presigned_urls(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<PresignedUrlsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    validation::require_files(&request.files)?;
    let storage = state.storage()?;

    let expires_in = Duration::from_secs(UPLOAD_URL_EXPIRY_SECS);
    let mut presigned_data = Vec::with_capacity(request.files.len());

    for file in request.files {
        let file_name = generate_unique_file_name(&file.name);
        let s3_key = upload_key(&file_name);

        let presigned_url = storage
            .presigned_put_url(&s3_key, &file.content_type, expires_in)
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to generate presigned URL for {}: {}",
                    file.name,
                    e.message()
                ))
            })?;

        presigned_data.push(PresignedUpload {
            original_name: file.name,
            file_name,
            presigned_url,
            s3_key,
            size: file.size,
            content_type: file.content_type,
        });
    }

    tracing::info!(count = presigned_data.len(), "Generated presigned upload URLs");

    Ok(Json(PresignedUrlsResponse {
        message: "Presigned URLs generated successfully".to_string(),
        count: presigned_data.len(),
        presigned_data,
    }))
}

/// Confirm a direct upload and return its public URL
///
/// Advisory only: the store is not consulted.
#[utoipa::path(
    post,
    path = "/confirm-upload",
    tag = "uploads",
    request_body = ConfirmUploadRequest,
    responses(
        (status = 200, description = "Upload confirmed", body = ConfirmUploadResponse),
        (status = 400, description = "Missing s3Key", body = ErrorResponse),
        (status = 500, description = "Bucket not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(s3_key = %request.s3_key, operation = "confirm_upload"))]
pub async fn confirm_upload(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ConfirmUploadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let key = validation::require_key(Some(request.s3_key.as_str()))?;
    let url = state.storage()?.public_url(key);

    tracing::info!(s3_key = %request.s3_key, file_name = %request.file_name, "Upload confirmed");

    Ok(Json(ConfirmUploadResponse {
        message: "Upload confirmed".to_string(),
        uploaded_file: UploadedFile {
            original_name: request.original_name,
            file_name: request.file_name,
            url,
            size: request.size,
            content_type: request.content_type,
        },
    }))
}
