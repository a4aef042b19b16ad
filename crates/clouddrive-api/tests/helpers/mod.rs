//! Test helpers: in-memory storage and a router-backed TestServer.
//!
//! Run from workspace root: `cargo test -p clouddrive-api`.

#![allow(dead_code)]

pub mod storage;

use axum_test::TestServer;
use clouddrive_api::setup::routes;
use clouddrive_api::state::AppState;
use clouddrive_core::Config;
use clouddrive_storage::Storage;
use std::collections::HashMap;
use std::sync::Arc;

pub use storage::MemoryStorage;

pub const TEST_BUCKET: &str = "test-bucket";
pub const TEST_REGION: &str = "us-east-1";

pub fn test_config(with_bucket: bool) -> Config {
    test_config_with(with_bucket, &[])
}

/// Test config with extra variables layered on top.
pub fn test_config_with(with_bucket: bool, extra: &[(&str, &str)]) -> Config {
    let mut vars = HashMap::from([
        ("AWS_ACCESS_KEY_ID".to_string(), "AKIDTEST".to_string()),
        ("AWS_SECRET_ACCESS_KEY".to_string(), "secret".to_string()),
        ("AWS_REGION".to_string(), TEST_REGION.to_string()),
    ]);
    if with_bucket {
        vars.insert("S3_BUCKET_NAME".to_string(), TEST_BUCKET.to_string());
    }
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Test application: server plus the store behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Option<Arc<MemoryStorage>>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage(&self) -> &MemoryStorage {
        self.storage.as_deref().expect("test app has storage")
    }
}

fn build(config: Config, storage: Option<Arc<MemoryStorage>>) -> TestApp {
    let dyn_storage = storage.clone().map(|s| s as Arc<dyn Storage>);
    let state = Arc::new(AppState::new(config.clone(), dyn_storage));
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");
    TestApp { server, storage }
}

/// App backed by an empty in-memory bucket.
pub fn setup_test_app() -> TestApp {
    build(
        test_config(true),
        Some(Arc::new(MemoryStorage::new(TEST_BUCKET, TEST_REGION))),
    )
}

/// App backed by a pre-populated store.
pub fn setup_test_app_with(storage: MemoryStorage) -> TestApp {
    build(test_config(true), Some(Arc::new(storage)))
}

/// App configured with ENVIRONMENT=production.
pub fn setup_production_app() -> TestApp {
    build(
        test_config_with(true, &[("ENVIRONMENT", "production")]),
        Some(Arc::new(MemoryStorage::new(TEST_BUCKET, TEST_REGION))),
    )
}

/// App started without S3_BUCKET_NAME.
pub fn setup_unconfigured_app() -> TestApp {
    build(test_config(false), None)
}
