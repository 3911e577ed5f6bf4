use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::response::{ApiError, AppQuery};
use crate::blob::{variant_path, BlobStoreError};
use crate::storage::models::FileKind;
use crate::AppState;

use super::optional_session;

#[derive(Debug, Deserialize)]
pub struct DataParams {
    #[serde(default)]
    pub size: Option<String>,
}

/// GET /files/:id/data - serve a file's content, or a derived variant.
///
/// Readable anonymously when the record is public; otherwise only by the
/// owner. A `size` value outside the configured width classes falls back to
/// the original bytes.
pub async fn file_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    AppQuery(params): AppQuery<DataParams>,
) -> Result<Response, ApiError> {
    let file = state
        .db
        .get_file(&id)
        .map_err(|e| ApiError::internal(e.to_string()))?
        .ok_or_else(ApiError::not_found)?;

    // An invalid or expired token reads as anonymous, not as an error.
    let caller = optional_session(&state, &headers);
    if !file.is_public && caller.as_deref() != Some(file.user_id.as_str()) {
        return Err(ApiError::forbidden());
    }

    if file.kind == FileKind::Folder {
        return Err(ApiError::bad_request("A folder doesn't have content"));
    }

    let local_path = file.local_path.as_deref().ok_or_else(ApiError::not_found)?;

    let requested_width = params
        .size
        .as_deref()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|w| state.config.thumbnails.sizes.contains(w));
    let path = match requested_width {
        Some(width) => variant_path(local_path, width),
        None => local_path.to_string(),
    };

    let data = state.blob_store.read(&path).await.map_err(|e| match e {
        BlobStoreError::NotFound(_) => ApiError::not_found(),
        _ => ApiError::internal(format!("Failed to retrieve file: {e}")),
    })?;

    // Content type comes from the record's name, not from the stored bytes.
    let mime_type = mime_guess::from_path(&file.name).first_or_octet_stream();

    let mut response = (StatusCode::OK, data).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(
        header::CONTENT_TYPE,
        mime_type
            .as_ref()
            .parse()
            .unwrap_or(header::HeaderValue::from_static("application/octet-stream")),
    );

    Ok(response)
}
