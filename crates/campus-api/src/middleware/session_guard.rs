//! Session guard for the admin site.
//!
//! Runs on every request to the static admin site and decides from cookie
//! presence alone. Token validity is not checked here: a stale cookie passes
//! the guard and the first API call answers 401.

use crate::auth::middleware::cookie_value;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use campus_core::GuardRules;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct GuardState {
    pub rules: GuardRules,
    pub cookie_name: String,
}

impl GuardState {
    pub fn new(rules: GuardRules, cookie_name: impl Into<String>) -> Self {
        Self {
            rules,
            cookie_name: cookie_name.into(),
        }
    }
}

pub async fn session_guard(
    State(guard): State<Arc<GuardState>>,
    request: Request,
    next: Next,
) -> Response {
    let has_token = cookie_value(request.headers(), &guard.cookie_name).is_some();
    // The query string is not carried into `redirect`
    let path = request.uri().path();
    let decision = guard.rules.evaluate(path, has_token);

    match decision.location() {
        None => next.run(request).await,
        Some(location) => {
            tracing::debug!(
                path = %path,
                has_token,
                location = %location,
                "Session guard redirect"
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
