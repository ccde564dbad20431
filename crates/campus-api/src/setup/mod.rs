//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use campus_core::ApiConfig;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: &ApiConfig) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config.base.environment)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(config).await?;
    let state = Arc::new(AppState::new(config, storage));

    let router = routes::setup_routes(config, state.clone())?;

    Ok((state, router))
}
