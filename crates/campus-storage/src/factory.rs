use crate::{S3Storage, Storage, StorageError, StorageResult};
use campus_core::StorageConfig;
use std::sync::Arc;

/// Create the storage backend described by configuration
pub async fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    let bucket = config
        .bucket
        .clone()
        .ok_or_else(|| StorageError::Config("S3_BUCKET not configured".to_string()))?;
    let region = config.region.clone().ok_or_else(|| {
        StorageError::Config("S3_REGION or AWS_REGION not configured".to_string())
    })?;
    let endpoint = config.endpoint.clone();

    let storage = S3Storage::new(bucket, region, endpoint).await?;
    tracing::info!(
        backend = storage.backend_name(),
        bucket = %storage.bucket(),
        "Storage backend initialized"
    );
    Ok(Arc::new(storage))
}
