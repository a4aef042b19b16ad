//! CloudDrive Storage Library
//!
//! This crate provides the storage abstraction used by the CloudDrive server and its
//! S3 implementation. The server never moves object bytes itself: it mints presigned
//! URLs, lists keys, and forwards deletes.
//!
//! # Storage key format
//!
//! Every uploaded object lives at `uploads/{basename}-{uuid}{ext}`. Uniqueness relies
//! on the random identifier only. Key generation is centralized in the `keys` module
//! and public URL construction in `location`.

pub mod factory;
pub mod keys;
pub mod location;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{file_name_from_key, generate_unique_file_name, upload_key};
pub use location::BucketLocation;
pub use s3::{S3Storage, StaticCredentials};
pub use traits::{ObjectInfo, Storage, StorageError, StorageResult};
