use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson, AppQuery};
use crate::storage::models::{FileKind, FileRecord, NewFile, ROOT_PARENT};
use crate::storage::FileCreateError;
use crate::thumbnail::ThumbnailJob;
use crate::AppState;

use super::require_session;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, rename = "parentId")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default, rename = "isPublic")]
    pub is_public: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    #[serde(rename = "parentId")]
    pub parent_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListFilesParams {
    #[serde(default, rename = "parentId")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /files - create a folder, or upload a file/image payload
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    AppJson(req): AppJson<UploadRequest>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let user_id = require_session(&state, &headers)?;

    let name = req
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing name"))?;

    let kind = req
        .kind
        .as_deref()
        .and_then(FileKind::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid type"))?;

    // Folders carry no payload; everything else must arrive with one.
    let local_path = match kind {
        FileKind::Folder => None,
        FileKind::File | FileKind::Image => {
            let data = req
                .data
                .ok_or_else(|| ApiError::bad_request("Missing data"))?;
            let path = state
                .blob_store
                .write_payload(&data)
                .await
                .map_err(|e| match e {
                    crate::blob::BlobStoreError::Decode(_) => {
                        ApiError::bad_request("Invalid data encoding")
                    }
                    _ => ApiError::internal(format!("Failed to store file: {e}")),
                })?;
            Some(path)
        }
    };

    let file = state
        .db
        .create_file(NewFile {
            owner_id: user_id,
            name,
            kind,
            parent_id: req.parent_id,
            is_public: req.is_public.unwrap_or(false),
            local_path,
        })
        .map_err(|e| match e {
            FileCreateError::ParentNotFound => ApiError::bad_request("Parent not found"),
            FileCreateError::ParentNotFolder => ApiError::bad_request("Parent is not a folder"),
            FileCreateError::EmptyName => ApiError::bad_request("Missing name"),
            FileCreateError::MissingLocalPath => ApiError::bad_request("Missing data"),
            FileCreateError::Database(e) => ApiError::internal(e.to_string()),
        })?;

    // The record is committed; thumbnails follow best-effort.
    if file.kind == FileKind::Image {
        if let Err(e) = state.jobs.enqueue(ThumbnailJob {
            file_id: file.id.clone(),
            owner_id: file.user_id.clone(),
        }) {
            tracing::warn!(file_id = %file.id, error = %e, "Failed to enqueue thumbnail job");
        }
    }

    tracing::debug!(file_id = %file.id, kind = kind.as_str(), "Created file");

    Ok((StatusCode::CREATED, Json(file_to_response(&file))))
}

/// GET /files/:id - a single owned record
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let user_id = require_session(&state, &headers)?;

    let file = state
        .db
        .get_file_for_owner(&user_id, &id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(file_to_response(&file)))
}

/// GET /files - list the caller's records under a parent, optionally paged
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    AppQuery(params): AppQuery<ListFilesParams>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let user_id = require_session(&state, &headers)?;
    let parent_id = params.parent_id.unwrap_or_else(|| ROOT_PARENT.to_string());

    let files = match params.page {
        Some(page) => state
            .db
            .list_children_page(&user_id, &parent_id, page, state.config.page_size),
        None => state.db.list_children(&user_id, &parent_id),
    }
    .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(files.iter().map(file_to_response).collect()))
}

/// PUT /files/:id/publish - make an owned record readable by anyone
pub async fn publish_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    set_visibility(state, headers, id, true).await
}

/// PUT /files/:id/unpublish - restrict an owned record to its owner
pub async fn unpublish_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    set_visibility(state, headers, id, false).await
}

async fn set_visibility(
    state: Arc<AppState>,
    headers: HeaderMap,
    id: String,
    is_public: bool,
) -> Result<Json<FileResponse>, ApiError> {
    let user_id = require_session(&state, &headers)?;

    // Ownership check first: someone else's record reads as absent.
    state
        .db
        .get_file_for_owner(&user_id, &id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(ApiError::not_found)?;

    let file = state
        .db
        .set_visibility(&id, is_public)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(ApiError::not_found)?;

    tracing::debug!(file_id = %id, is_public, "Changed file visibility");

    Ok(Json(file_to_response(&file)))
}

// ============================================================================
// Helpers
// ============================================================================

pub(super) fn file_to_response(file: &FileRecord) -> FileResponse {
    FileResponse {
        id: file.id.clone(),
        user_id: file.user_id.clone(),
        name: file.name.clone(),
        kind: file.kind,
        is_public: file.is_public,
        parent_id: file.parent_id.clone(),
    }
}
