use axum::{extract::Multipart, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::Claims;
use crate::db::AppState;

use super::error_response;

/// Generic blob upload (reel videos mostly). The stored key is
/// `{user_id}/{timestamp}.{ext}` and the response carries the public URL
/// the client then posts back as `video_url`.
pub async fn upload(
    State(state): State<AppState>,
    claims: Claims,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing file field" })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Invalid multipart body: {}", e) })),
            )
                .into_response();
        }
    };

    let ext = field
        .file_name()
        .and_then(|name| name.rsplit('.').next())
        .unwrap_or("mp4")
        .to_string();

    let bytes = match field.bytes().await {
        Ok(b) => b,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Failed to read upload: {}", e) })),
            )
                .into_response();
        }
    };

    match state.media.save(claims.uid, &ext, &bytes) {
        Ok(url) => (StatusCode::CREATED, Json(json!({ "url": url }))).into_response(),
        Err(e) => error_response(e),
    }
}
