use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::auth::Claims;
use crate::db::AppState;
use crate::services::points_service;

use super::error_response;

#[utoipa::path(
    get,
    path = "/api/badges",
    responses(
        (status = 200, description = "Full badge catalog, cheapest first")
    )
)]
pub async fn list_badges(State(state): State<AppState>) -> impl IntoResponse {
    match points_service::list_badge_catalog(&state.conn).await {
        Ok(badges) => Json(json!({ "badges": badges, "total": badges.len() })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn list_owned(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match points_service::owned_badges(&state.conn, claims.uid).await {
        Ok(badges) => Json(json!({ "badges": badges, "total": badges.len() })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn purchase_badge(
    State(state): State<AppState>,
    claims: Claims,
    Path(badge_id): Path<i32>,
) -> impl IntoResponse {
    match points_service::purchase_badge(&state.conn, claims.uid, badge_id).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({ "receipt": receipt, "message": "Badge purchased" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
