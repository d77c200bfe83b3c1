use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::db::AppState;
use crate::services::reel_service::{self, DEFAULT_PAGE_SIZE};

use super::error_response;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

pub async fn list_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(0);
    let per_page = params.per_page.unwrap_or(DEFAULT_PAGE_SIZE);
    match reel_service::list_feed(&state.conn, page, per_page).await {
        Ok(feed) => Json(json!({
            "reels": feed.reels,
            "page": feed.page,
            "per_page": feed.per_page,
            "total": feed.total,
        }))
        .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReelRequest {
    pub video_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn create_reel(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateReelRequest>,
) -> impl IntoResponse {
    match reel_service::create_reel(&state.conn, claims.uid, req.video_url, req.description).await
    {
        Ok(reel) => (
            StatusCode::CREATED,
            Json(json!({ "reel": reel, "message": "Reel published" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_reel(
    State(state): State<AppState>,
    claims: Claims,
    Path(reel_id): Path<i32>,
) -> impl IntoResponse {
    match reel_service::delete_reel(&state.conn, claims.uid, reel_id).await {
        Ok(()) => Json(json!({ "message": "Reel deleted" })).into_response(),
        Err(e) => error_response(e),
    }
}
