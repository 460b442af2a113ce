//! Error types for the hotel indexer service.

use hotels_pipeline::errors::{FetchError, QueueError, SubscriptionError};
use hotels_repository::RepositoryError;
use thiserror::Error;

/// Errors that can occur during service initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Fetcher error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Subscription error: {0}")]
    Subscription(#[from] SubscriptionError),

    /// A background task ended abnormally.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::RuntimeError(msg.into())
    }
}
