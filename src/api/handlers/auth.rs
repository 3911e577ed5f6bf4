use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::auth::{decode_basic_credentials, hash_password, AuthError};
use crate::AppState;

use super::{require_session, TOKEN_HEADER};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// GET /connect - exchange Basic credentials for a session token
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let (email, password) = decode_basic_credentials(auth_header)?;

    let user = state
        .db
        .get_user_by_email(&email)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

    if user.password_hash != hash_password(&password) {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.sessions.create(&user.id);
    tracing::debug!(user_id = %user.id, "Session created");

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - revoke the presented session token
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    // Validate the token before revoking so an unknown token still earns a 401.
    require_session(&state, &headers)?;

    if let Some(token) = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        state.sessions.revoke(token);
    }

    Ok(StatusCode::NO_CONTENT)
}
