//! Campus Core Library
//!
//! This crate provides the domain types, error taxonomy, input validation,
//! route-guard rules and configuration shared by the campus API, its HTTP
//! client and the CLI.

pub mod config;
pub mod content_type;
pub mod error;
pub mod keys;
pub mod models;
pub mod route_guard;
pub mod validation;

// Re-export commonly used types
pub use config::{ApiConfig, BaseConfig, StorageConfig};
pub use content_type::{content_type_for_filename, key_extension, DEFAULT_CONTENT_TYPE};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use keys::{is_absolute_url, validate_storage_key, MAX_KEY_LENGTH};
pub use models::{ChangePasswordRequest, PresignReadQuery, PresignedRead, PresignedWrite, UploadIntent};
pub use route_guard::{Decision, GuardRules, PathKind, REDIRECT_PARAM};
pub use validation::{FieldViolation, Validate, ValidationError};
