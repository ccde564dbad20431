//! Route configuration and setup

use crate::auth::{require_session, AuthState};
use crate::error::HttpAppError;
use crate::handlers;
use crate::middleware::{expose_error_details, session_guard, GuardState};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use campus_core::{ApiConfig, AppError};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Upload intents and queries are tiny; file bytes never pass through the API.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Setup all application routes
pub fn setup_routes(config: &ApiConfig, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState::new(&config.jwt_secret, &config.session_cookie));
    let guard_state = Arc::new(GuardState::new(
        config.guard.clone(),
        &config.session_cookie,
    ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        );

    // Protected routes (require a verified session)
    let protected_routes = Router::new()
        .route("/upload/presign", post(handlers::upload::presign_upload))
        .route("/upload/presign-get", get(handlers::upload::presign_download))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            require_session,
        ));

    let http_concurrency_limit = config.base.http_concurrency_limit;
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = public_routes
        .merge(protected_routes)
        .with_state(state)
        .fallback_service(admin_site(config, guard_state));

    // Error details stay out of responses in production
    let app = if config.is_production() {
        app
    } else {
        app.layer(axum::middleware::from_fn(expose_error_details))
    };

    let app = app
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Everything outside the API: the static admin site when configured, else a
/// JSON 404. The session guard sits in front either way.
fn admin_site(config: &ApiConfig, guard_state: Arc<GuardState>) -> Router {
    let site = match &config.static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Serving admin site behind session guard");
            let index = ServeFile::new(dir.join("index.html"));
            Router::new().fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => Router::new().fallback(not_found),
    };

    site.layer(axum::middleware::from_fn_with_state(
        guard_state,
        session_guard,
    ))
}

async fn not_found() -> Response {
    HttpAppError(AppError::NotFound("Route not found".to_string())).into_response()
}

/// Setup CORS configuration
fn setup_cors(config: &ApiConfig) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.base.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .base
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {}: {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // The session cookie only crosses origins with credentials allowed
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    };
    Ok(cors)
}
