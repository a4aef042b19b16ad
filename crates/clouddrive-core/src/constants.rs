//! Fixed protocol values shared by server and client.

/// Key prefix under which every uploaded object is stored and listed.
pub const UPLOAD_PREFIX: &str = "uploads/";

/// Maximum number of objects returned by a single directory listing.
pub const LIST_MAX_KEYS: usize = 100;

/// Lifetime of a presigned PUT URL.
pub const UPLOAD_URL_EXPIRY_SECS: u64 = 5 * 60;

/// Lifetime of a presigned GET URL.
pub const DOWNLOAD_URL_EXPIRY_SECS: u64 = 60 * 60;

/// Declared per-file limit, advertised but not enforced on the presign path.
pub const MAX_FILE_SIZE_MB: usize = 100;

/// Declared per-batch limit, advertised to clients but not validated server-side.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

pub const SERVICE_NAME: &str = "CloudDrive Backend API";

/// Variables the server warns about at startup when absent.
pub const REQUIRED_ENV_VARS: [&str; 3] =
    ["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "S3_BUCKET_NAME"];
