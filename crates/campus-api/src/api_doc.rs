//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use campus_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Upload Broker API",
        version = "0.1.0",
        description = "Issues presigned object-storage URLs so browsers upload and display files without proxying bytes through the API. Upload endpoints require a session cookie (`access_token`) or a Bearer token."
    ),
    paths(
        handlers::health::health_check,
        handlers::upload::presign_upload,
        handlers::upload::presign_download,
    ),
    components(
        schemas(
            models::UploadIntent,
            models::PresignedWrite,
            models::PresignedRead,
            campus_core::FieldViolation,
            error::ErrorResponse,
            handlers::health::HealthCheckResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Presigned upload and read URLs"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
