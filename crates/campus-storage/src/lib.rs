//! Campus Storage Library
//!
//! Presigning backends for direct browser and CLI uploads. The API never
//! proxies file bytes: it hands out time-limited PUT and GET URLs and the
//! client talks to object storage directly.
//!
//! # Storage key format
//!
//! Upload keys are `uploads/{field}/{uuid}.{ext}`. Keys must not contain `..`
//! or a leading `/`; every backend checks this before signing.

pub mod factory;
pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_upload_key;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
