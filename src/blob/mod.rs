mod local;

pub use local::LocalBlobStore;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Invalid payload encoding: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path collision: {0}")]
    Collision(String),
    #[error("Blob not found: {0}")]
    NotFound(String),
}

/// Abstraction over blob storage. Contents are addressed by generated paths
/// recorded in the file catalog -- the raw blobs are meaningless without it.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Decode a base64 payload and persist it at a freshly generated path.
    /// Returns the path for the catalog record.
    async fn write_payload(&self, payload: &str) -> Result<String, BlobStoreError>;

    /// Persist bytes at an exact path, overwriting any previous content.
    /// Used by the thumbnail worker for derived variants.
    async fn write_at(&self, path: &str, data: Bytes) -> Result<(), BlobStoreError>;

    /// Read the bytes at a path. `NotFound` when the path does not exist;
    /// any other failure is a distinct IO error.
    async fn read(&self, path: &str) -> Result<Bytes, BlobStoreError>;

    async fn exists(&self, path: &str) -> Result<bool, BlobStoreError>;

    /// Whether the backing storage is currently usable.
    async fn is_alive(&self) -> bool;
}

/// Path of a derived variant beside its original.
pub fn variant_path(path: &str, width: u32) -> String {
    format!("{path}_{width}")
}
