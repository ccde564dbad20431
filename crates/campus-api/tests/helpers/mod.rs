//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p campus-api`. Storage is an
//! in-memory fake, so no bucket or credentials are needed.

#![allow(dead_code)]

pub mod auth;
pub mod storage;

use axum_test::TestServer;
use campus_api::setup::routes;
use campus_api::state::AppState;
use campus_core::ApiConfig;
use campus_storage::Storage;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Configuration as the server would read it from the environment.
pub fn test_config(static_dir: Option<&Path>) -> ApiConfig {
    test_config_with(static_dir, &[])
}

/// Like [`test_config`], with extra variables layered on top.
pub fn test_config_with(static_dir: Option<&Path>, extra: &[(&str, &str)]) -> ApiConfig {
    let mut vars: HashMap<&str, String> = HashMap::from([
        ("JWT_SECRET", auth::TEST_JWT_SECRET.to_string()),
        ("S3_BUCKET", "campus-test".to_string()),
        ("S3_REGION", "us-east-1".to_string()),
    ]);
    if let Some(dir) = static_dir {
        vars.insert("ADMIN_STATIC_DIR", dir.display().to_string());
    }
    for (key, value) in extra {
        vars.insert(*key, value.to_string());
    }

    let config = ApiConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    config.validate().unwrap();
    config
}

pub fn build_server(config: &ApiConfig, storage: Arc<dyn Storage>) -> TestServer {
    let state = Arc::new(AppState::new(config, storage));
    let router = routes::setup_routes(config, state).unwrap();
    TestServer::new(router).unwrap()
}

/// Test server backed by the deterministic fake storage.
pub fn setup_test_app() -> TestServer {
    build_server(&test_config(None), Arc::new(storage::FakeStorage))
}
