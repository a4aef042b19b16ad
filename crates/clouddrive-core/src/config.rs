//! Configuration module
//!
//! This module provides the server configuration: listen settings, CORS, declared
//! upload limits, and the object-storage connection settings.
//!
//! Values come from the process environment (after loading an optional `.env` file).
//! Missing storage settings never abort startup; they are reported by
//! [`Config::missing_required_vars`] and surface later as configuration errors on the
//! endpoints that need the bucket.

use std::env;

use crate::constants::{
    DEFAULT_PORT, DEFAULT_REGION, MAX_FILES_PER_UPLOAD, MAX_FILE_SIZE_MB, REQUIRED_ENV_VARS,
};

/// Listen, CORS, and policy settings.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_file_size_bytes: usize,
    pub max_files_per_upload: usize,
}

/// Object-storage connection settings.
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: String,
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub base: BaseConfig,
    pub storage: StorageConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServerConfig>);

impl Config {
    fn inner(&self) -> &ServerConfig {
        &self.0
    }

    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let max_file_size_mb = get("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let max_files_per_upload = get("MAX_FILES_PER_UPLOAD")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILES_PER_UPLOAD);

        let base = BaseConfig {
            server_port,
            cors_origins,
            environment,
            max_file_size_bytes: max_file_size_mb.saturating_mul(1024 * 1024),
            max_files_per_upload,
        };

        let storage = StorageConfig {
            aws_access_key_id: get("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            aws_region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_bucket: get("S3_BUCKET_NAME").or_else(|| get("S3_BUCKET")),
            s3_endpoint: get("S3_ENDPOINT"),
        };

        Ok(Config(Box::new(ServerConfig { base, storage })))
    }

    /// Names of required variables that are not set, in declaration order.
    pub fn missing_required_vars(&self) -> Vec<&'static str> {
        let storage = &self.inner().storage;
        REQUIRED_ENV_VARS
            .iter()
            .copied()
            .filter(|name| match *name {
                "AWS_ACCESS_KEY_ID" => storage.aws_access_key_id.is_none(),
                "AWS_SECRET_ACCESS_KEY" => storage.aws_secret_access_key.is_none(),
                "S3_BUCKET_NAME" => storage.s3_bucket.is_none(),
                _ => false,
            })
            .collect()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins().is_empty() || self.cors_origins().iter().any(|o| o == "*")
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.inner().base.max_file_size_bytes
    }

    pub fn max_files_per_upload(&self) -> usize {
        self.inner().base.max_files_per_upload
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.inner().storage
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().storage.s3_bucket.as_deref()
    }

    pub fn aws_region(&self) -> &str {
        &self.inner().storage.aws_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().storage.s3_endpoint.as_deref()
    }
}
