use thiserror::Error;
use tokio::sync::mpsc;

/// A unit of thumbnail work, queued after the owning file record commits.
#[derive(Debug, Clone)]
pub struct ThumbnailJob {
    pub file_id: String,
    pub owner_id: String,
}

#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("Job queue is full")]
    Full,
    #[error("Job queue is closed")]
    Closed,
}

/// Producer side of the thumbnail pipeline.
///
/// Delivery contract: best-effort, at-most-once. Jobs live in a bounded
/// in-process channel; a failed enqueue leaves the already-committed file
/// record intact, and the caller logs and moves on. Jobs do not survive a
/// process restart.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<ThumbnailJob>,
}

impl JobQueue {
    /// Create the queue and the receiver end for a worker.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ThumbnailJob>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Hand a job to the worker without waiting.
    pub fn enqueue(&self, job: ThumbnailJob) -> Result<(), EnqueueError> {
        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
            mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
        })
    }
}
