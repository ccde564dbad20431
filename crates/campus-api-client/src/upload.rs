//! Upload broker operations.
//!
//! A file reaches object storage in two sequential round trips: ask the API
//! for a presigned write, then PUT the bytes straight to storage. The returned
//! key is what the caller persists; display URLs are re-derived from it with
//! [`ApiClient::resolve_read_url`] each time they are needed.

use bytes::Bytes;
use campus_core::{
    content_type_for_filename, is_absolute_url, PresignReadQuery, PresignedRead, PresignedWrite,
    UploadIntent, Validate,
};
use reqwest::header::CONTENT_TYPE;

use crate::error::{extract_error_message, ClientError, ClientResult};
use crate::ApiClient;

pub const PRESIGN_PATH: &str = "/upload/presign";
pub const PRESIGN_GET_PATH: &str = "/upload/presign-get";

/// File selected for upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    /// Explicit content type; derived from the filename when `None`
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl FilePayload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Content-Type sent with the PUT: explicit, else by extension, else
    /// `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        match self.content_type.as_deref() {
            Some(ct) if !ct.trim().is_empty() => ct,
            _ => content_type_for_filename(&self.filename),
        }
    }
}

impl ApiClient {
    /// Ask the API for a presigned write URL and the key it will live under.
    ///
    /// The intent is validated first; an invalid intent never reaches the network.
    #[tracing::instrument(skip(self, intent), fields(field = %intent.field, filename = %intent.filename))]
    pub async fn request_upload_url(&self, intent: &UploadIntent) -> ClientResult<PresignedWrite> {
        intent.validate()?;

        let write: PresignedWrite = self.post_json(PRESIGN_PATH, intent).await?;
        tracing::debug!(key = %write.key, "Received presigned write");
        Ok(write)
    }

    /// PUT the payload to the presigned URL.
    ///
    /// Goes directly to object storage: no API auth headers or cookies are
    /// attached, and the URL is not retried.
    #[tracing::instrument(skip(self, write, payload), fields(key = %write.key, size = payload.bytes.len()))]
    pub async fn put_object(&self, write: &PresignedWrite, payload: &FilePayload) -> ClientResult<()> {
        let response = self
            .storage_client()
            .put(&write.url)
            .header(CONTENT_TYPE, payload.content_type())
            .body(payload.bytes.clone())
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Upload to storage succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match extract_error_message(&body) {
            Some(detail) => format!("Upload failed with status {}: {}", status.as_u16(), detail),
            None => format!("Upload failed with status {}", status.as_u16()),
        };
        tracing::warn!(status = status.as_u16(), "Upload to storage failed");
        Err(ClientError::Upload {
            status: status.as_u16(),
            message,
        })
    }

    /// Request a presigned read URL for a storage key.
    ///
    /// The key is validated first; an invalid key never reaches the network.
    pub async fn presign_read(&self, key: &str) -> ClientResult<PresignedRead> {
        let query = PresignReadQuery {
            key: key.to_string(),
        };
        query.validate()?;

        self.fetch_read_url(key).await
    }

    async fn fetch_read_url(&self, key: &str) -> ClientResult<PresignedRead> {
        let read: PresignedRead = self.get(PRESIGN_GET_PATH, &[("key", key)]).await?;
        if read.url.trim().is_empty() {
            return Err(ClientError::Resolution(
                "presign-get response did not contain a URL".to_string(),
            ));
        }
        Ok(read)
    }

    /// Turn a stored key into a URL that can be displayed right now.
    ///
    /// Absolute URLs (records written before presigned uploads) come back
    /// unchanged with no request. Any other key costs exactly one presign-get,
    /// even one the server will reject; failures are logged and yield `None`.
    /// Results are never cached since read URLs expire.
    pub async fn resolve_read_url(&self, key: &str) -> Option<String> {
        if is_absolute_url(key) {
            return Some(key.to_string());
        }

        match self.fetch_read_url(key).await {
            Ok(read) => Some(read.url),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to resolve read URL");
                None
            }
        }
    }

    /// Request a presigned write for `field` and upload the payload to it.
    ///
    /// Returns the presigned write; callers persist `key` and discard `url`.
    pub async fn upload_file(&self, field: &str, payload: &FilePayload) -> ClientResult<PresignedWrite> {
        let intent = UploadIntent::new(field, payload.filename.clone())
            .with_content_type(payload.content_type());

        let write = self.request_upload_url(&intent).await?;
        self.put_object(&write, payload).await?;
        Ok(write)
    }
}
