//! Request validation performed before any storage call.

use clouddrive_core::models::FileDescriptor;
use clouddrive_core::AppError;

/// A presign batch must name at least one file.
pub fn require_files(files: &[FileDescriptor]) -> Result<(), AppError> {
    if files.is_empty() {
        return Err(AppError::InvalidInput("No files provided".to_string()));
    }
    Ok(())
}

/// Object key carried by download and delete requests.
pub fn require_key(key: Option<&str>) -> Result<&str, AppError> {
    match key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(AppError::InvalidInput("File key is required".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_rejected() {
        let err = require_files(&[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "No files provided"));
    }

    #[test]
    fn key_must_be_present_and_non_empty() {
        assert!(require_key(None).is_err());
        assert!(require_key(Some("")).is_err());
        assert_eq!(require_key(Some("uploads/a.txt")).unwrap(), "uploads/a.txt");
    }
}
