use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::blob::{variant_path, BlobStore};
use crate::storage::Database;

use super::queue::ThumbnailJob;
use super::resize::resize_to_width;

/// Consumer side of the thumbnail pipeline.
///
/// Jobs are processed with bounded concurrency. A job's error handling is
/// terminal: failures are logged and the job dropped, with no retry or
/// dead-letter path. Variants are written independently, so a failure can
/// leave some widths present and others missing; re-enqueueing the same file
/// overwrites whatever already exists.
pub struct ThumbnailWorker {
    db: Database,
    blob_store: Arc<dyn BlobStore>,
    sizes: Vec<u32>,
    concurrency: usize,
}

impl ThumbnailWorker {
    pub fn new(
        db: Database,
        blob_store: Arc<dyn BlobStore>,
        sizes: Vec<u32>,
        concurrency: usize,
    ) -> Self {
        Self {
            db,
            blob_store,
            sizes,
            concurrency,
        }
    }

    /// Consume jobs until the queue's sender side is dropped.
    pub fn spawn(self, mut rx: mpsc::Receiver<ThumbnailJob>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                concurrency = self.concurrency,
                sizes = ?self.sizes,
                "Thumbnail worker started"
            );

            let semaphore = Arc::new(Semaphore::new(self.concurrency));
            while let Some(job) = rx.recv().await {
                let permit = match Arc::clone(&semaphore).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };

                let db = self.db.clone();
                let blob_store = Arc::clone(&self.blob_store);
                let sizes = self.sizes.clone();
                tokio::spawn(async move {
                    let _permit = permit;
                    if let Err(e) = process_job(&db, blob_store.as_ref(), &sizes, &job).await {
                        error!(
                            file_id = %job.file_id,
                            owner_id = %job.owner_id,
                            error = %e,
                            "Thumbnail job failed, dropping"
                        );
                    }
                });
            }

            info!("Thumbnail worker stopped");
        })
    }
}

/// Generate every configured variant for one queued file.
async fn process_job(
    db: &Database,
    blob_store: &dyn BlobStore,
    sizes: &[u32],
    job: &ThumbnailJob,
) -> Result<(), anyhow::Error> {
    let file = db
        .get_file_for_owner(&job.owner_id, &job.file_id)?
        .ok_or_else(|| anyhow::anyhow!("file record not found"))?;

    let local_path = file
        .local_path
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("record has no content path"))?;

    let original = blob_store.read(local_path).await?;

    for &width in sizes {
        let resized = resize_to_width(&original, width)?;
        blob_store
            .write_at(&variant_path(local_path, width), resized)
            .await?;
        info!(file_id = %job.file_id, width, "Thumbnail written");
    }

    Ok(())
}
