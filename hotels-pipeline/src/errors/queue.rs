//! Error types for the job queue and worker.
use hotels_shared::JobKind;
use thiserror::Error;

use crate::errors::{CrawlerError, ErrorKind, IndexerError};

/// Failure reported by a job handler.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Crawler(#[from] CrawlerError),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
}

impl JobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobError::Crawler(e) => e.kind(),
            JobError::Indexer(e) => e.kind(),
        }
    }
}

/// Represents errors that can occur while dispatching jobs.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("A handler is already registered for job type {0}")]
    HandlerAlreadyRegistered(JobKind),
    /// Configuration error: the job can never succeed on this worker.
    #[error("No handler registered for job type {0}")]
    UnregisteredJobKind(JobKind),
    #[error("Job failed: {0}")]
    Job(#[from] JobError),
}

impl QueueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueueError::HandlerAlreadyRegistered(_) | QueueError::UnregisteredJobKind(_) => {
                ErrorKind::Unexpected
            }
            QueueError::Job(e) => e.kind(),
        }
    }

    /// Whether the job should be delivered again.
    pub fn is_retryable(&self) -> bool {
        match self {
            QueueError::Job(e) => e.kind().is_retryable(),
            _ => false,
        }
    }
}
