use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{create_jwt, hash_password, verify_password, Claims};
use crate::db::AppState;
use crate::models::profile::{self as profile_model, Entity as Profile, ProfileDto};

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.username.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "username, email and password are required" })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e })),
            )
                .into_response();
        }
    };

    let now = chrono::Utc::now().to_rfc3339();
    let profile = profile_model::ActiveModel {
        username: Set(payload.username.trim().to_string()),
        email: Set(payload.email.trim().to_lowercase()),
        password_hash: Set(password_hash),
        avatar_url: Set(payload.avatar_url),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match profile.insert(&state.conn).await {
        Ok(saved) => {
            let token = match create_jwt(&saved.username, saved.id) {
                Ok(t) => t,
                Err(e) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": e })),
                    )
                        .into_response();
                }
            };
            (
                StatusCode::CREATED,
                Json(json!({ "token": token, "profile": ProfileDto::from(saved) })),
            )
                .into_response()
        }
        // UNIQUE(username) / UNIQUE(email); anything else is an
        // infrastructure failure, not a duplicate
        Err(e) if e.to_string().contains("UNIQUE constraint failed") => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Account already exists" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Failed to create account: {}", e) })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for {}", payload.email);

    let profile = match Profile::find()
        .filter(profile_model::Column::Email.eq(payload.email.trim().to_lowercase()))
        .one(&state.conn)
        .await
    {
        Ok(Some(p)) => p,
        _ => {
            tracing::warn!("Unknown account: {}", payload.email);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &profile.password_hash) {
        Ok(true) => match create_jwt(&profile.username, profile.id) {
            Ok(token) => (
                StatusCode::OK,
                Json(json!({ "token": token, "profile": ProfileDto::from(profile) })),
            )
                .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e })),
            )
                .into_response(),
        },
        _ => {
            tracing::warn!("Password verification failed for {}", profile.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

pub async fn get_me(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match Profile::find_by_id(claims.uid).one(&state.conn).await {
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
