use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::Claims;
use crate::db::AppState;
use crate::services::points_service;

use super::error_response;

#[utoipa::path(
    get,
    path = "/api/points",
    responses(
        (status = 200, description = "Points ledger summary for the caller")
    )
)]
pub async fn get_balance(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match points_service::compute_balance(&state.conn, claims.uid).await {
        Ok(summary) => Json(json!({ "summary": summary })).into_response(),
        Err(e) => error_response(e),
    }
}
