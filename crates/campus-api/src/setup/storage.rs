//! Storage setup

use anyhow::{Context, Result};
use campus_core::ApiConfig;
use campus_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &ApiConfig) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(&config.storage)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        endpoint = config.storage.endpoint.as_deref().unwrap_or("default"),
        put_expiry_secs = config.presign_put_expiry.as_secs(),
        get_expiry_secs = config.presign_get_expiry.as_secs(),
        "Presigned URL expiries configured"
    );

    Ok(storage)
}
