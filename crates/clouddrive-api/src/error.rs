//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Any `AppError` or
//! `StorageError` converts with `?` and renders as `{ "error": ..., "code": ... }`.
//! Outside production the router installs [`expose_error_details`], which adds
//! `details` and `error_type` to that body.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clouddrive_core::{AppError, ErrorMetadata, LogLevel};
use clouddrive_storage::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: IntoResponse and AppError are both foreign here)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that answers 400 with our ErrorResponse format on
/// deserialization failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Full error body, carried as a response extension until
/// [`expose_error_details`] decides whether the client sees it.
#[derive(Debug, Clone)]
struct DetailedErrorBody(ErrorResponse);

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse {
            error: app_error.client_message(),
            details: None,
            error_type: None,
            code: app_error.error_code().to_string(),
        };
        let detailed = ErrorResponse {
            details: Some(app_error.to_string()),
            error_type: Some(app_error.error_type().to_string()),
            ..body.clone()
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(DetailedErrorBody(detailed));
        response
    }
}

/// Response mapper for non-production routers: rewrites error bodies to
/// include `details` and `error_type`.
pub async fn expose_error_details(mut response: Response) -> Response {
    let detailed = response.extensions_mut().remove::<DetailedErrorBody>();
    match detailed {
        Some(DetailedErrorBody(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
            StorageError::PresignFailed(msg)
            | StorageError::ListFailed(msg)
            | StorageError::DeleteFailed(msg) => AppError::Storage(msg),
        };
        HttpAppError(app)
    }
}
