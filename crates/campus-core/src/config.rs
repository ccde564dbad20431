//! Configuration module
//!
//! Configuration for the upload broker API: server basics, session handling,
//! object storage and the session guard's route rules. Values come from the
//! environment (with `.env` support) and are checked by `validate()` before
//! the server starts.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::route_guard::GuardRules;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_SESSION_COOKIE: &str = "access_token";
const PRESIGN_PUT_EXPIRY_SECS: u64 = 900;
const PRESIGN_GET_EXPIRY_SECS: u64 = 3600;
/// Longest expiry S3 accepts for a SigV4 presigned URL (7 days)
const MAX_PRESIGN_EXPIRY_SECS: u64 = 604_800;
const MIN_JWT_SECRET_LEN: usize = 32;
const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Base configuration shared by every service
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Requests served at once before new ones wait
    pub http_concurrency_limit: usize,
}

impl BaseConfig {
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Object storage settings
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub bucket: Option<String>,
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
}

/// Upload broker API configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base: BaseConfig,
    pub jwt_secret: String,
    /// Name of the session cookie (`access_token` unless overridden)
    pub session_cookie: String,
    pub storage: StorageConfig,
    pub presign_put_expiry: Duration,
    pub presign_get_expiry: Duration,
    pub guard: GuardRules,
    /// Static admin site served behind the session guard, when set
    pub static_dir: Option<PathBuf>,
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ApiConfig {
    /// Load configuration from the process environment and `.env`.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins: parse_list(&cors_origins_str),
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .unwrap_or_else(|| DEFAULT_HTTP_CONCURRENCY_LIMIT.to_string())
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be a valid number"))?
                .max(1),
        };

        let defaults = GuardRules::default();
        let guard = GuardRules {
            signin_path: var("GUARD_SIGNIN_PATH").unwrap_or(defaults.signin_path),
            home_path: var("GUARD_HOME_PATH").unwrap_or(defaults.home_path),
            auth_paths: var("GUARD_AUTH_PATHS")
                .map(|s| parse_list(&s))
                .unwrap_or(defaults.auth_paths),
            protected_prefixes: var("GUARD_PROTECTED_PREFIXES")
                .map(|s| parse_list(&s))
                .unwrap_or(defaults.protected_prefixes),
        };

        Ok(ApiConfig {
            base,
            jwt_secret: var("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            session_cookie: var("SESSION_COOKIE")
                .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
            storage: StorageConfig {
                bucket: var("S3_BUCKET"),
                region: var("S3_REGION").or_else(|| var("AWS_REGION")),
                endpoint: var("S3_ENDPOINT"),
            },
            presign_put_expiry: Duration::from_secs(
                var("PRESIGN_PUT_EXPIRY_SECS")
                    .unwrap_or_else(|| PRESIGN_PUT_EXPIRY_SECS.to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PRESIGN_PUT_EXPIRY_SECS must be a valid number"))?,
            ),
            presign_get_expiry: Duration::from_secs(
                var("PRESIGN_GET_EXPIRY_SECS")
                    .unwrap_or_else(|| PRESIGN_GET_EXPIRY_SECS.to_string())
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PRESIGN_GET_EXPIRY_SECS must be a valid number"))?,
            ),
            guard,
            static_dir: var("ADMIN_STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn is_production(&self) -> bool {
        self.base.is_production()
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if self.storage.bucket.is_none() {
            return Err(anyhow::anyhow!(
                "S3_BUCKET must be set when using S3 storage backend"
            ));
        }
        if self.storage.region.is_none() {
            return Err(anyhow::anyhow!(
                "S3_REGION or AWS_REGION must be set when using S3 storage backend"
            ));
        }

        for (name, expiry) in [
            ("PRESIGN_PUT_EXPIRY_SECS", self.presign_put_expiry),
            ("PRESIGN_GET_EXPIRY_SECS", self.presign_get_expiry),
        ] {
            let secs = expiry.as_secs();
            if secs == 0 || secs > MAX_PRESIGN_EXPIRY_SECS {
                return Err(anyhow::anyhow!(
                    "{} must be between 1 and {} seconds",
                    name,
                    MAX_PRESIGN_EXPIRY_SECS
                ));
            }
        }

        if !self.guard.signin_path.starts_with('/') || !self.guard.home_path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "GUARD_SIGNIN_PATH and GUARD_HOME_PATH must be absolute paths"
            ));
        }
        // A home page inside the auth pages would redirect signed-in users forever
        if self.guard.classify(&self.guard.home_path) == crate::route_guard::PathKind::Signin {
            return Err(anyhow::anyhow!(
                "GUARD_HOME_PATH must not be one of the auth pages"
            ));
        }

        if let Some(dir) = &self.static_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "ADMIN_STATIC_DIR must point to an existing directory: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }
}
