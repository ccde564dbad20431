use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{extract::State, Json};
use campus_core::{content_type_for_filename, PresignReadQuery, PresignedRead, PresignedWrite, UploadIntent};
use campus_storage::generate_upload_key;
use std::sync::Arc;

/// Generate a presigned URL for direct upload to object storage
///
/// The returned `key` is what the caller stores on its record; the `url` is
/// only good for a single PUT before it expires.
#[utoipa::path(
    post,
    path = "/upload/presign",
    tag = "uploads",
    request_body = UploadIntent,
    responses(
        (status = 200, description = "Presigned URL generated", body = PresignedWrite),
        (status = 400, description = "Invalid upload intent", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 502, description = "Storage could not sign the URL", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, intent),
    fields(
        user_id = %session.user_id,
        field = %intent.field,
        filename = %intent.filename,
        operation = "presign_upload"
    )
)]
pub async fn presign_upload(
    session: SessionContext,
    State(state): State<Arc<AppState>>,
    ValidatedJson(intent): ValidatedJson<UploadIntent>,
) -> Result<Json<PresignedWrite>, HttpAppError> {
    let key = generate_upload_key(&intent.field, &intent.filename);
    let content_type = intent
        .content_type
        .clone()
        .unwrap_or_else(|| content_type_for_filename(&intent.filename).to_string());

    let url = state
        .storage
        .presigned_put_url(&key, &content_type, state.presign.put_expiry)
        .await?;

    tracing::info!(
        key = %key,
        content_type = %content_type,
        expires_in_seconds = state.presign.put_expiry.as_secs(),
        "Generated presigned URL for direct upload"
    );

    Ok(Json(PresignedWrite { url, key }))
}

/// Generate a short-lived read URL for a stored key
#[utoipa::path(
    get,
    path = "/upload/presign-get",
    tag = "uploads",
    params(PresignReadQuery),
    responses(
        (status = 200, description = "Presigned read URL generated", body = PresignedRead),
        (status = 400, description = "Invalid key", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 502, description = "Storage could not sign the URL", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(user_id = %session.user_id, key = %query.key, operation = "presign_download")
)]
pub async fn presign_download(
    session: SessionContext,
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<PresignReadQuery>,
) -> Result<Json<PresignedRead>, HttpAppError> {
    let url = state
        .storage
        .presigned_get_url(&query.key, state.presign.get_expiry)
        .await?;

    tracing::debug!("Generated presigned read URL");

    Ok(Json(PresignedRead { url }))
}
