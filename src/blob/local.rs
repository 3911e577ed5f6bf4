use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use super::{BlobStore, BlobStoreError};

/// Local filesystem blob store. Originals land at `{root}/{uuid}`; derived
/// variants are written beside them by the thumbnail worker.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, std::io::Error> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn write_payload(&self, payload: &str) -> Result<String, BlobStoreError> {
        let data = STANDARD.decode(payload)?;

        let path = self.root.join(uuid::Uuid::new_v4().to_string());
        let path_str = path.to_string_lossy().into_owned();
        if path.exists() {
            return Err(BlobStoreError::Collision(path_str));
        }

        tokio::fs::write(&path, &data).await?;
        Ok(path_str)
    }

    async fn write_at(&self, path: &str, data: Bytes) -> Result<(), BlobStoreError> {
        tokio::fs::write(path, &data).await?;
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Bytes, BlobStoreError> {
        if !Path::new(path).exists() {
            return Err(BlobStoreError::NotFound(path.to_string()));
        }
        let data = tokio::fs::read(path).await?;
        Ok(Bytes::from(data))
    }

    async fn exists(&self, path: &str) -> Result<bool, BlobStoreError> {
        Ok(Path::new(path).exists())
    }

    async fn is_alive(&self) -> bool {
        self.root.is_dir()
    }
}
