use async_trait::async_trait;
use campus_storage::{Storage, StorageError, StorageResult};
use std::time::Duration;

pub const FAKE_STORAGE_BASE: &str = "https://campus-test.s3.example.com";

/// Signs nothing; URLs encode the method, key and expiry so tests can assert on them.
pub struct FakeStorage;

#[async_trait]
impl Storage for FakeStorage {
    async fn presigned_put_url(
        &self,
        storage_key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "{}/{}?X-Amz-Method=PUT&X-Amz-Expires={}&ct={}",
            FAKE_STORAGE_BASE,
            storage_key,
            expires_in.as_secs(),
            content_type
        ))
    }

    async fn presigned_get_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "{}/{}?X-Amz-Method=GET&X-Amz-Expires={}",
            FAKE_STORAGE_BASE,
            storage_key,
            expires_in.as_secs()
        ))
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}

/// Every presign fails as if the signer were misconfigured.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn presigned_put_url(
        &self,
        _storage_key: &str,
        _content_type: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::Presign("credentials unavailable".to_string()))
    }

    async fn presigned_get_url(
        &self,
        _storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::Presign("credentials unavailable".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
