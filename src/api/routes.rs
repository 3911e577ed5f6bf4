use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    Router::new()
        // App
        .route("/status", get(handlers::status))
        .route("/stats", get(handlers::stats))
        // Users & sessions
        .route("/users", post(handlers::create_user))
        .route("/users/me", get(handlers::get_me))
        .route("/connect", get(handlers::connect))
        .route("/disconnect", get(handlers::disconnect))
        // Files
        .route("/files", get(handlers::list_files))
        .route(
            "/files",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/files/:id", get(handlers::get_file))
        .route("/files/:id/publish", put(handlers::publish_file))
        .route("/files/:id/unpublish", put(handlers::unpublish_file))
        .route("/files/:id/data", get(handlers::file_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
