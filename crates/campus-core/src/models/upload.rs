use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::{IntoParams, ToSchema};

use crate::keys::{has_parent_segment, is_absolute_url, MAX_KEY_LENGTH};
use crate::validation::{Check, Schema, Validate, ValidationError};

/// Request for a presigned write URL, created when a user picks a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadIntent {
    /// Form field the file belongs to (e.g. `photo`, `signature`)
    #[serde(default)]
    pub field: String,
    /// Original filename
    #[serde(default)]
    pub filename: String,
    /// Content type (MIME type); derived from the filename when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl UploadIntent {
    pub fn new(field: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            filename: filename.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

static UPLOAD_INTENT_SCHEMA: LazyLock<Schema<UploadIntent>> = LazyLock::new(|| {
    Schema::<UploadIntent>::new()
        .required(
            "field",
            |i| Some(i.field.as_str()),
            Check::Length { min: 1, max: 64 },
            "field must be between 1 and 64 characters",
        )
        .required(
            "field",
            |i| Some(i.field.as_str()),
            Check::matches(r"^[A-Za-z0-9_-]+$"),
            "field may only contain letters, digits, '_' and '-'",
        )
        .required(
            "filename",
            |i| Some(i.filename.as_str()),
            Check::Length { min: 1, max: 255 },
            "filename must be between 1 and 255 characters",
        )
        .required(
            "filename",
            |i| Some(i.filename.as_str()),
            Check::rejects(r"[/\\]"),
            "filename must not contain path separators",
        )
        .optional(
            "contentType",
            |i| i.content_type.as_deref(),
            Check::matches(r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*/[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*(\s*;.*)?$"),
            "contentType must look like type/subtype",
        )
});

impl Validate for UploadIntent {
    fn validate(&self) -> Result<(), ValidationError> {
        UPLOAD_INTENT_SCHEMA.validate(self)
    }
}

/// Presigned write returned by `POST /upload/presign`.
///
/// `url` is a time-limited PUT endpoint used at most once; `key` is the durable
/// identifier stored on the owning record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PresignedWrite {
    pub url: String,
    pub key: String,
}

/// Presigned read returned by `GET /upload/presign-get`. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PresignedRead {
    pub url: String,
}

/// Query for `GET /upload/presign-get`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PresignReadQuery {
    /// Storage key previously returned by `POST /upload/presign`
    #[serde(default)]
    pub key: String,
}

fn is_not_url(value: &str) -> bool {
    !is_absolute_url(value)
}

fn has_no_parent_segment(value: &str) -> bool {
    !has_parent_segment(value)
}

static PRESIGN_READ_SCHEMA: LazyLock<Schema<PresignReadQuery>> = LazyLock::new(|| {
    Schema::<PresignReadQuery>::new()
        .required(
            "key",
            |q| Some(q.key.as_str()),
            Check::Length {
                min: 1,
                max: MAX_KEY_LENGTH,
            },
            "key must be between 1 and 1024 characters",
        )
        .required(
            "key",
            |q| Some(q.key.as_str()),
            Check::rejects(r"^/"),
            "key must not start with '/'",
        )
        .required(
            "key",
            |q| Some(q.key.as_str()),
            Check::Predicate(has_no_parent_segment),
            "key must not contain '..' segments",
        )
        .required(
            "key",
            |q| Some(q.key.as_str()),
            Check::Predicate(is_not_url),
            "key must be a storage key, not a URL",
        )
});

impl Validate for PresignReadQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        PRESIGN_READ_SCHEMA.validate(self)
    }
}
