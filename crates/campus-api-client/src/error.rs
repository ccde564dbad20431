//! Client error type and response-body normalization.

use campus_core::ValidationError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Session missing or expired (HTTP 401)
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Direct PUT to object storage failed
    #[error("{message}")]
    Upload { status: u16, message: String },

    #[error("Could not resolve read URL: {0}")]
    Resolution(String),

    /// Any other non-2xx API response
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            ClientError::Transport("Could not connect to the server".to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }

    /// HTTP status behind this error, when there was a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Auth(_) => Some(401),
            ClientError::Upload { status, .. } | ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// Preference order: JSON `message` (a string, or a list of strings joined
/// with `, `), then JSON `error`, then the plain-text body. Returns `None`
/// when the body has nothing usable.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            let from_message = match map.get("message") {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(Value::Array(items)) => {
                    let parts: Vec<&str> = items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|s| !s.trim().is_empty())
                        .collect();
                    (!parts.is_empty()).then(|| parts.join(", "))
                }
                _ => None,
            };
            from_message.or_else(|| match map.get("error") {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                _ => None,
            })
        }
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s),
        // JSON without a usable message
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Message for a failed response: the extracted body message, or a generic
/// one naming the status.
pub(crate) fn normalize_error_message(status: StatusCode, body: &str) -> String {
    extract_error_message(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
