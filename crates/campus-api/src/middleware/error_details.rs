//! Development-only error detail rendering.

use crate::error::DetailedError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Replace error bodies with their detailed form. Installed only when the
/// configured environment is not production.
pub async fn expose_error_details(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<DetailedError>() {
        Some(DetailedError(body)) => {
            let (parts, _) = response.into_parts();
            (parts, Json(body)).into_response()
        }
        None => response,
    }
}
