//! CloudDrive API Library
//!
//! This crate provides the HTTP handlers and application setup for the CloudDrive
//! server: presigned upload and download URLs, upload confirmation, listing and
//! deletion, all backed by an injected [`clouddrive_storage::Storage`].

mod api_doc;
mod handlers;
mod validation;

pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
