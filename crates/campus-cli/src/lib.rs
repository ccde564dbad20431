//! Shared pieces of the `campus` binary.

use anyhow::Context;
use campus_api_client::{FilePayload, SessionExpiredHandler};
use serde::Serialize;
use std::path::Path;

/// Printed after an upload: the key to persist and a display URL resolved from it.
#[derive(Debug, Serialize)]
pub struct UploadOutput {
    pub key: String,
    pub read_url: Option<String>,
}

/// Tells the user to sign in again when the API answers 401.
pub struct SigninHint;

impl SessionExpiredHandler for SigninHint {
    fn on_session_expired(&self) {
        eprintln!("Session rejected. Sign in again and update CAMPUS_ACCESS_TOKEN.");
    }
}

/// Read a file into an upload payload named after the file.
pub async fn load_payload(path: &Path, content_type: Option<String>) -> anyhow::Result<FilePayload> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))?
        .to_string();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let payload = FilePayload::new(filename, bytes);
    Ok(match content_type {
        Some(ct) => payload.with_content_type(ct),
        None => payload,
    })
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
