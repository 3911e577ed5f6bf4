use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub db: bool,
    pub storage: bool,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: u64,
    pub files: u64,
}

/// GET /status - liveness of the backing stores
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        db: state.db.is_alive(),
        storage: state.blob_store.is_alive().await,
    })
}

/// GET /stats - user and file counts
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let users = state
        .db
        .count_users()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let files = state
        .db
        .count_files()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(StatsResponse { users, files }))
}
