pub mod files;
pub mod presigned_upload;
pub mod system;
