//! Service banner and liveness.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use clouddrive_core::constants::SERVICE_NAME;
use clouddrive_core::models::{HealthResponse, ServiceInfo};

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service banner", body = ServiceInfo))
)]
pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        message: SERVICE_NAME.to_string(),
        status: "running".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "OK".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    )
}
