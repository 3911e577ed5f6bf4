use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson};
use crate::auth::hash_password;
use crate::storage::UserCreateError;
use crate::AppState;

use super::require_session;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

/// POST /users - register a new user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing email"))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing password"))?;

    let user = state
        .db
        .create_user(&email, &hash_password(&password))
        .map_err(|e| match e {
            UserCreateError::AlreadyExists => ApiError::bad_request("User already exists"),
            UserCreateError::Database(e) => ApiError::internal(e.to_string()),
        })?;

    tracing::debug!(user_id = %user.id, "Registered user");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            email: user.email,
        }),
    ))
}

/// GET /users/me - the authenticated user's own record
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = require_session(&state, &headers)?;

    let user = state
        .db
        .get_user(&user_id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
    }))
}
