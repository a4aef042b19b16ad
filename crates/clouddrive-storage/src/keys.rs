//! Storage key generation.
//!
//! Key format: `uploads/{basename}-{uuid}{ext}`. The extension is everything from
//! the last `.` of the base name, except that a leading dot (as in `.env`) does not
//! start an extension.

use clouddrive_core::constants::UPLOAD_PREFIX;
use uuid::Uuid;

/// Split a file name into (stem, extension), dropping any directory part.
fn split_name(original_name: &str) -> (&str, &str) {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    match base.rfind('.') {
        Some(idx) if idx > 0 => base.split_at(idx),
        _ => (base, ""),
    }
}

/// Generate a collision-resistant file name from the client's original name.
pub fn generate_unique_file_name(original_name: &str) -> String {
    let (stem, ext) = split_name(original_name);
    format!("{}-{}{}", stem, Uuid::new_v4(), ext)
}

/// Full storage key for a generated file name.
pub fn upload_key(file_name: &str) -> String {
    format!("{}{}", UPLOAD_PREFIX, file_name)
}

/// Display name of a stored object: the substring after the last `/`.
pub fn file_name_from_key(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
