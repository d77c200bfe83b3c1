pub mod auth;
pub mod badges;
pub mod habits;
pub mod health;
pub mod media;
pub mod points;
pub mod profile;
pub mod reels;
pub mod social;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::db::AppState;
use crate::services::ServiceError;

/// Translate a service failure into the status code and `{"error": ...}`
/// body the mobile client expects. Nothing here is fatal to the process.
pub(crate) fn error_response(err: ServiceError) -> Response {
    let status = match &err {
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::AlreadyOwned => StatusCode::CONFLICT,
        ServiceError::InsufficientPoints { .. } => StatusCode::CONFLICT,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Profiles
        .route("/profiles/:id", get(profile::get_profile))
        .route("/profiles/:id/overview", get(profile::get_overview))
        .route("/profile", put(profile::update_profile))
        .route("/profile/avatar", post(profile::upload_avatar))
        // Social graph
        .route("/social/status/:id", get(social::get_status))
        .route("/social/toggle", post(social::toggle_follow))
        .route("/social/friends", get(social::list_friends))
        .route("/social/requests/:id/accept", post(social::accept_request))
        .route("/social/requests/:id/decline", post(social::decline_request))
        .route("/social/friends/:id", delete(social::remove_friend))
        // Habit shop
        .route("/habits", get(habits::list_habits))
        .route("/habits/recommendations", get(habits::list_recommendations))
        .route("/habits/:id/adopt", post(habits::adopt_habit))
        .route("/habits/:id", delete(habits::drop_habit))
        .route("/tasks", get(habits::list_tasks))
        .route("/tasks/:id/complete", put(habits::complete_task))
        // Points & badges
        .route("/points", get(points::get_balance))
        .route("/badges", get(badges::list_badges))
        .route("/badges/owned", get(badges::list_owned))
        .route("/badges/:id/purchase", post(badges::purchase_badge))
        // Reels
        .route("/reels", get(reels::list_feed).post(reels::create_reel))
        .route("/reels/:id", delete(reels::delete_reel))
        // Media
        .route("/media/upload", post(media::upload))
        .with_state(state)
}
