//! Error types module
//!
//! All server-side failures are unified under [`AppError`]. The taxonomy is small:
//! validation problems (400), a missing bucket configuration (500), failed storage
//! calls (500, upstream message passed through verbatim), and unknown routes (404).

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Static metadata per variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::Configuration(_) => (500, "CONFIGURATION_ERROR", LogLevel::Error),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Configuration(_) => "Configuration",
            AppError::Storage(_) => "Storage",
            AppError::NotFound(_) => "NotFound",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Configuration(ref msg) => msg.clone(),
            // Upstream storage failures are surfaced verbatim.
            AppError::Storage(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_invalid_input() {
        let err = AppError::InvalidInput("File key is required".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.client_message(), "File key is required");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_configuration() {
        let err = AppError::Configuration("S3 bucket name not configured".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert_eq!(err.client_message(), "S3 bucket name not configured");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_storage_message_passes_through_verbatim() {
        let err = AppError::Storage("The specified bucket does not exist".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert_eq!(err.client_message(), "The specified bucket does not exist");
        assert_eq!(err.error_type(), "Storage");
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        let err = AppError::NotFound("Route /nope not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Not found: Route /nope not found");
    }
}
