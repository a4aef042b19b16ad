//! Route configuration and setup

use crate::error::{self, HttpAppError};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method, Uri},
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use clouddrive_core::{AppError, Config};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let mut app = Router::new()
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .route(
            "/generate-presigned-urls",
            post(handlers::presigned_upload::generate_presigned_urls),
        )
        .route(
            "/confirm-upload",
            post(handlers::presigned_upload::confirm_upload),
        )
        .route("/list-files", get(handlers::files::list_files))
        .route("/download-url", post(handlers::files::download_url))
        .route("/delete-file", delete(handlers::files::delete_file))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .fallback(not_found)
        .with_state(state)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"));

    if !config.is_production() {
        app = app.layer(middleware::map_response(error::expose_error_details));
    }

    Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
}

async fn not_found(uri: Uri) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!("Route {} not found", uri.path())))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allows_any_origin() {
        tracing::debug!("CORS configured to allow all origins");
        return Ok(cors.allow_origin(Any));
    }

    let origins = config
        .cors_origins()
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors.allow_origin(origins))
}
