mod queue;
mod resize;
mod worker;

pub use queue::{EnqueueError, JobQueue, ThumbnailJob};
pub use resize::resize_to_width;
pub use worker::ThumbnailWorker;
