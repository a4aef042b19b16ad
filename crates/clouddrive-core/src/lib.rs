//! CloudDrive Core Library
//!
//! This crate provides the wire schemas, error types, configuration, and constants
//! shared by the CloudDrive server, storage layer, and client.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
