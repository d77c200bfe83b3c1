use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::db::AppState;
use crate::models::profile::{self as profile_model, Entity as Profile, ProfileDto};
use crate::services::{friend_service, points_service};

use super::error_response;

// Public profile lookup
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Profile::find_by_id(id).one(&state.conn).await {
        Ok(Some(profile)) => Json(json!({ "profile": ProfileDto::from(profile) })).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Profile not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", e) })),
        )
            .into_response(),
    }
}

/// Everything the friend-profile screen shows in one response: the profile,
/// ledger summary, relationship status, mutuals, badges and recent activity.
pub async fn get_overview(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let profile = match Profile::find_by_id(id).one(&state.conn).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Profile not found" })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response();
        }
    };

    let status = friend_service::resolve_status(&state.conn, claims.uid, id).await;

    let summary = match points_service::compute_balance(&state.conn, id).await {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };
    let badges = match points_service::owned_badges(&state.conn, id).await {
        Ok(b) => b,
        Err(e) => return error_response(e),
    };
    let history = match points_service::recent_completed(&state.conn, id, 5).await {
        Ok(h) => h,
        Err(e) => return error_response(e),
    };
    let mutual_friends = match friend_service::mutual_friends_count(&state.conn, claims.uid, id).await
    {
        Ok(n) => n,
        Err(e) => return error_response(e),
    };
    let following_count = match friend_service::following_ids(&state.conn, id).await {
        Ok(ids) => ids.len(),
        Err(e) => return error_response(e),
    };

    Json(json!({
        "profile": ProfileDto::from(profile),
        "status": status,
        "mutual_friends": mutual_friends,
        "friends_count": following_count,
        "summary": summary,
        "badges": badges,
        "recent_activity": history,
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

// Update own username and/or avatar
pub async fn update_profile(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let profile = match Profile::find_by_id(claims.uid).one(&state.conn).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Profile not found" })),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Database error: {}", e) })),
            )
                .into_response();
        }
    };

    let mut active: profile_model::ActiveModel = profile.into();

    if let Some(username) = req.username {
        if username.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Username cannot be empty" })),
            )
                .into_response();
        }
        active.username = Set(username.trim().to_string());
    }
    if let Some(avatar_url) = req.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&state.conn).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(json!({
                "profile": ProfileDto::from(updated),
                "message": "Profile updated successfully"
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to update profile: {}", e) })),
        )
            .into_response(),
    }
}

/// Multipart avatar upload; stores the image and points the profile at it.
pub async fn upload_avatar(
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
        .unwrap_or("jpg")
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

    let url = match state.media.save(claims.uid, &ext, &bytes) {
        Ok(u) => u,
        Err(e) => return error_response(e),
    };

    let profile = match Profile::find_by_id(claims.uid).one(&state.conn).await {
        Ok(Some(p)) => p,
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Profile not found" })),
            )
                .into_response();
        }
    };

    let mut active: profile_model::ActiveModel = profile.into();
    active.avatar_url = Set(Some(url.clone()));
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&state.conn).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "avatar_url": url }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to update avatar: {}", e) })),
        )
            .into_response(),
    }
}
