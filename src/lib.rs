//! filedepot - authenticated file storage with folder hierarchies
//!
//! This crate provides user registration, token-based sessions, hierarchical
//! file metadata with per-file visibility, and content serving with:
//! - redb embedded database for users and file metadata (ACID, MVCC, crash-safe)
//! - Local blob storage for file contents, addressed by generated paths
//! - An in-process job queue feeding a background thumbnail worker
//! - REST API with base64 upload payloads

pub mod api;
pub mod auth;
pub mod blob;
pub mod config;
pub mod storage;
pub mod thumbnail;

use std::sync::Arc;

use auth::SessionStore;
use blob::BlobStore;
use config::Config;
use storage::Database;
use thumbnail::JobQueue;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub sessions: SessionStore,
    pub blob_store: Arc<dyn BlobStore>,
    pub jobs: JobQueue,
}
