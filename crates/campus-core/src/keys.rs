//! Storage key helpers.
//!
//! A storage key is an opaque, storage-relative identifier (for example
//! `uploads/photo/5f0c8a44-....png`). It carries no expiry and is what domain
//! records persist. Records written before presigned uploads existed may hold a
//! full URL instead; those are recognised by [`is_absolute_url`] and used as-is.

use crate::validation::ValidationError;

/// Longest key accepted by the presign endpoints.
pub const MAX_KEY_LENGTH: usize = 1024;

/// True when `value` is an absolute `http`/`https` URL with a host.
///
/// Other schemes are not treated as URLs, so a key such as
/// `student:42/photo.png` is still resolved through the broker.
pub fn is_absolute_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// True when `key` contains a `..` path segment.
pub fn has_parent_segment(key: &str) -> bool {
    key.split('/').any(|segment| segment == "..")
}

/// Validate a storage key before it is handed to a storage backend.
///
/// Rules:
/// - Not empty, at most 1024 characters
/// - No leading `/`
/// - No `..` segment
/// - Not an absolute URL
pub fn validate_storage_key(key: &str) -> Result<(), ValidationError> {
    if key.trim().is_empty() {
        return Err(ValidationError::single("key", "key is required"));
    }
    if key.chars().count() > MAX_KEY_LENGTH {
        return Err(ValidationError::single(
            "key",
            format!("key must be at most {} characters", MAX_KEY_LENGTH),
        ));
    }
    if key.starts_with('/') {
        return Err(ValidationError::single(
            "key",
            "key must not start with '/'",
        ));
    }
    if has_parent_segment(key) {
        return Err(ValidationError::single(
            "key",
            "key must not contain '..' segments",
        ));
    }
    if is_absolute_url(key) {
        return Err(ValidationError::single(
            "key",
            "key must be a storage key, not a URL",
        ));
    }
    Ok(())
}
