use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::db::AppState;
use crate::services::friend_service::{self, FollowStatus};

use super::error_response;

// Relationship the caller has with another user, plus mutual friends
pub async fn get_status(
    State(state): State<AppState>,
    claims: Claims,
    Path(target_id): Path<i32>,
) -> impl IntoResponse {
    let status = friend_service::resolve_status(&state.conn, claims.uid, target_id).await;
    let mutual_friends =
        match friend_service::mutual_friends_count(&state.conn, claims.uid, target_id).await {
            Ok(n) => n,
            Err(e) => return error_response(e),
        };

    Json(json!({ "status": status, "mutual_friends": mutual_friends })).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ToggleFollowRequest {
    pub target_id: i32,
    pub current_status: FollowStatus,
}

// Follow or unfollow based on the status the client last rendered
pub async fn toggle_follow(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<ToggleFollowRequest>,
) -> impl IntoResponse {
    match friend_service::toggle_follow(&state.conn, claims.uid, req.target_id, req.current_status)
        .await
    {
        Ok(status) => Json(json!({ "status": status })).into_response(),
        Err(e) => error_response(e),
    }
}

// Mutual friends and pending incoming requests in one payload
pub async fn list_friends(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match friend_service::friends_and_requests(&state.conn, claims.uid).await {
        Ok(lists) => Json(json!({
            "friends": lists.friends,
            "requests": lists.requests,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn accept_request(
    State(state): State<AppState>,
    claims: Claims,
    Path(requester_id): Path<i32>,
) -> impl IntoResponse {
    match friend_service::accept_request(&state.conn, claims.uid, requester_id).await {
        Ok(status) => (
            StatusCode::CREATED,
            Json(json!({ "status": status, "message": "Request accepted" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn decline_request(
    State(state): State<AppState>,
    claims: Claims,
    Path(requester_id): Path<i32>,
) -> impl IntoResponse {
    match friend_service::decline_request(&state.conn, claims.uid, requester_id).await {
        Ok(()) => Json(json!({ "message": "Request declined" })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn remove_friend(
    State(state): State<AppState>,
    claims: Claims,
    Path(friend_id): Path<i32>,
) -> impl IntoResponse {
    match friend_service::remove_friend(&state.conn, claims.uid, friend_id).await {
        Ok(()) => Json(json!({ "message": "Friend removed" })).into_response(),
        Err(e) => error_response(e),
    }
}
