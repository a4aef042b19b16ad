//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use clouddrive_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CloudDrive API",
        version = "0.1.0",
        description = "File manager API over S3. The server issues presigned upload and download URLs; file bytes travel directly between the client and the bucket."
    ),
    paths(
        handlers::system::root,
        handlers::system::health,
        handlers::presigned_upload::generate_presigned_urls,
        handlers::presigned_upload::confirm_upload,
        handlers::files::list_files,
        handlers::files::download_url,
        handlers::files::delete_file,
    ),
    components(schemas(
        models::FileDescriptor,
        models::PresignedUrlsRequest,
        models::PresignedUpload,
        models::PresignedUrlsResponse,
        models::ConfirmUploadRequest,
        models::UploadedFile,
        models::ConfirmUploadResponse,
        models::FileEntry,
        models::ListFilesResponse,
        models::KeyRequest,
        models::DownloadUrlResponse,
        models::DeleteFileResponse,
        models::ServiceInfo,
        models::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "system", description = "Service banner and liveness"),
        (name = "uploads", description = "Presigned uploads and confirmation"),
        (name = "files", description = "Listing, download links and deletion"),
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
