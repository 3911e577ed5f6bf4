mod app;
mod auth;
mod content;
mod files;
mod users;

pub use app::{stats, status};
pub use auth::{connect, disconnect};
pub use content::file_data;
pub use files::{get_file, list_files, publish_file, unpublish_file, upload_file};
pub use users::{create_user, get_me};

use axum::http::HeaderMap;

use crate::api::response::ApiError;
use crate::auth::AuthError;
use crate::AppState;

/// Session token header used by every authenticated route.
pub(crate) const TOKEN_HEADER: &str = "x-token";

/// Resolve the X-Token header to a user id, rejecting absent, unknown, and
/// expired tokens.
pub(crate) fn require_session(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    Ok(state.sessions.resolve(token).ok_or(AuthError::InvalidToken)?)
}

/// Resolve the X-Token header if present and valid; anything else is an
/// anonymous caller rather than an error.
pub(crate) fn optional_session(state: &AppState, headers: &HeaderMap) -> Option<String> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|token| state.sessions.resolve(token))
}
