use crate::auth::jwt::SessionVerifier;
use crate::auth::models::SessionContext;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use campus_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: SessionVerifier,
    pub cookie_name: String,
}

impl AuthState {
    pub fn new(jwt_secret: &str, cookie_name: impl Into<String>) -> Self {
        Self {
            verifier: SessionVerifier::new(jwt_secret),
            cookie_name: cookie_name.into(),
        }
    }
}

/// Value of cookie `name` across every `Cookie` header, if present and non-empty.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Session token from the session cookie, falling back to `Authorization: Bearer`.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    cookie_value(headers, cookie_name).or_else(|| bearer_token(headers))
}

pub async fn require_session(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match session_token(request.headers(), &auth_state.cookie_name) {
        Some(token) => token,
        None => {
            tracing::debug!(path = %request.uri().path(), "Request without session");
            return HttpAppError(AppError::Unauthorized("Missing session".to_string()))
                .into_response();
        }
    };

    match auth_state.verifier.verify(&token) {
        Ok(claims) => {
            let context = SessionContext::from(claims);
            tracing::debug!(user_id = %context.user_id, "Session verified");
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(e) => HttpAppError(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; access_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            cookie_value(&headers, "access_token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token="));
        assert_eq!(cookie_value(&headers, "access_token"), None);
    }

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(
            session_token(&headers, "access_token").as_deref(),
            Some("from-cookie")
        );

        headers.remove(header::COOKIE);
        assert_eq!(
            session_token(&headers, "access_token").as_deref(),
            Some("from-header")
        );
    }
}
