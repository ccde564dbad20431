//! Application state shared by the handlers.

use campus_core::ApiConfig;
use campus_storage::Storage;
use std::sync::Arc;
use std::time::Duration;

/// Expiry applied to presigned URLs.
#[derive(Clone, Copy, Debug)]
pub struct PresignConfig {
    pub put_expiry: Duration,
    pub get_expiry: Duration,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub presign: PresignConfig,
}

impl AppState {
    pub fn new(config: &ApiConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            presign: PresignConfig {
                put_expiry: config.presign_put_expiry,
                get_expiry: config.presign_get_expiry,
            },
        }
    }
}
