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
use crate::services::habit_service;

use super::error_response;

#[utoipa::path(
    get,
    path = "/api/habits",
    responses(
        (status = 200, description = "Full habit catalog, highest points first")
    )
)]
pub async fn list_habits(State(state): State<AppState>) -> impl IntoResponse {
    match habit_service::list_catalog(&state.conn).await {
        Ok(habits) => Json(json!({ "habits": habits, "total": habits.len() })).into_response(),
        Err(e) => error_response(e),
    }
}

// Catalog minus everything the caller already adopted
pub async fn list_recommendations(
    State(state): State<AppState>,
    claims: Claims,
) -> impl IntoResponse {
    match habit_service::recommendations(&state.conn, claims.uid).await {
        Ok(habits) => Json(json!({ "habits": habits, "total": habits.len() })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn adopt_habit(
    State(state): State<AppState>,
    claims: Claims,
    Path(habit_id): Path<i32>,
) -> impl IntoResponse {
    match habit_service::adopt_habit(&state.conn, claims.uid, habit_id).await {
        Ok(task) => (
            StatusCode::CREATED,
            Json(json!({ "task": task, "message": "Habit adopted" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

// Dropping twice is a no-op, not an error
pub async fn drop_habit(
    State(state): State<AppState>,
    claims: Claims,
    Path(habit_id): Path<i32>,
) -> impl IntoResponse {
    match habit_service::drop_habit(&state.conn, claims.uid, habit_id).await {
        Ok(removed) => Json(json!({ "removed": removed })).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    pub status: Option<String>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<TasksQuery>,
) -> impl IntoResponse {
    match habit_service::list_tasks(&state.conn, claims.uid, params.status).await {
        Ok(tasks) => Json(json!({ "tasks": tasks, "total": tasks.len() })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn complete_task(
    State(state): State<AppState>,
    claims: Claims,
    Path(task_id): Path<i32>,
) -> impl IntoResponse {
    match habit_service::complete_task(&state.conn, claims.uid, task_id).await {
        Ok(task) => Json(json!({ "task": task, "message": "Task completed" })).into_response(),
        Err(e) => error_response(e),
    }
}
