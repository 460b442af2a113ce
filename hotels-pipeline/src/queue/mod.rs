//! In-process job queue connecting the crawler to the indexer.
//!
//! [`Queue`] is the producer handle; [`Worker`] owns the handler registry and
//! consumes the matching [`JobReceiver`]. Delivery is at-least-once: a failed
//! job with a retryable error is enqueued again, so handlers must be idempotent.
use async_trait::async_trait;
use hotels_shared::{Job, JobPayload};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::JobError;

mod worker;

pub use worker::{Worker, WorkerConfig, MAX_REDELIVERY_DELAY};

/// A trait implemented by every job handler.
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Runs the job. Only the payload is handed over.
    async fn handle(&self, payload: JobPayload) -> Result<(), JobError>;
}

/// Producer side of the queue. Cheap to clone.
#[derive(Clone)]
pub struct Queue {
    sender: mpsc::UnboundedSender<Job>,
}

/// Consumer side of the queue, handed to [`Worker::run`].
pub struct JobReceiver {
    receiver: mpsc::UnboundedReceiver<Job>,
}

impl Queue {
    pub fn new() -> (Self, JobReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, JobReceiver { receiver })
    }

    /// Enqueues a job without waiting.
    ///
    /// Best-effort: if the worker is gone the job is logged and dropped.
    pub fn enqueue(&self, job: Job) {
        debug!(job_type = %job.kind, attempt = job.attempt, "Enqueueing job");
        if let Err(mpsc::error::SendError(job)) = self.sender.send(job) {
            warn!(
                job_type = %job.kind,
                hotel_address = ?job.payload.hotel_address,
                "Queue is closed, dropping job"
            );
        }
    }
}

impl JobReceiver {
    pub async fn recv(&mut self) -> Option<Job> {
        self.receiver.recv().await
    }

    /// Takes the next job if one is already waiting.
    pub fn try_recv(&mut self) -> Option<Job> {
        self.receiver.try_recv().ok()
    }
}
