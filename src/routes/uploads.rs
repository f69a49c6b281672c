//! Image upload route.
//!
//! ERROR HANDLING
//! ==============
//! Size and content-type validation run before anything is written, so a
//! rejected upload never reaches the blob store. Deleting the blob named
//! by the optional `replaces` field is best-effort housekeeping: failures
//! are logged and the fresh upload still succeeds.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::auth::AuthUser;
use crate::services::storage::{MAX_UPLOAD_BYTES, StorageError, validate_upload};
use crate::state::AppState;

pub(crate) fn storage_error_to_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        StorageError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        StorageError::ForeignUrl(_) => StatusCode::BAD_REQUEST,
        StorageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": message })))
}

/// `POST /api/uploads` — multipart upload of one image.
///
/// Fields: `file` (required, the image), `replaces` (optional, the public
/// URL of the blob this upload supersedes).
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut replaces: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.to_string()))?;
                if bytes.len() > MAX_UPLOAD_BYTES {
                    return Err(error_body(StatusCode::PAYLOAD_TOO_LARGE, "file exceeds 5 MB limit"));
                }
                file = Some((content_type, bytes.to_vec()));
            }
            "replaces" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.to_string()))?;
                if !value.is_empty() {
                    replaces = Some(value);
                }
            }
            _ => {}
        }
    }

    let Some((content_type, bytes)) = file else {
        return Err(error_body(StatusCode::BAD_REQUEST, "file field is required"));
    };

    validate_upload(&content_type, bytes.len())
        .map_err(|e| error_body(storage_error_to_status(&e), &e.to_string()))?;

    if let Some(old_url) = replaces {
        if let Err(e) = state.storage.delete_by_url(auth.user.id, &old_url).await {
            tracing::warn!(user_id = %auth.user.id, url = old_url, error = %e, "stale blob cleanup failed");
        }
    }

    let url = state
        .storage
        .store(auth.user.id, &content_type, &bytes)
        .await
        .map_err(|e| error_body(storage_error_to_status(&e), &e.to_string()))?;

    Ok(Json(serde_json::json!({ "url": url })))
}

#[cfg(test)]
#[path = "uploads_test.rs"]
mod tests;
