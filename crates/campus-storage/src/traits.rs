//! Storage abstraction trait
//!
//! This module defines the Storage trait that all presigning backends implement.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Presign failed: {0}")]
    Presign(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Presigning backend.
///
/// Implementations only sign URLs; expiry and single-use enforcement are the
/// object store's job.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Generate a presigned PUT URL the client uploads the bytes to.
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Generate a presigned GET URL for displaying a stored object.
    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Short backend name used in logs and the health report
    fn backend_name(&self) -> &'static str;
}

/// Reject keys a backend must never sign.
pub(crate) fn ensure_valid_key(storage_key: &str) -> StorageResult<()> {
    campus_core::validate_storage_key(storage_key)
        .map_err(|e| StorageError::InvalidKey(e.to_string()))
}
