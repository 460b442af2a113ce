//! Error types for the crawler.
use hotels_repository::RepositoryError;
use thiserror::Error;

use crate::errors::{ErrorKind, FetchError, SubscriptionError};

/// Represents errors that can occur while syncing hotels.
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Subscription error: {0}")]
    Subscription(#[from] SubscriptionError),
    #[error("Hotel repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CrawlerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CrawlerError::InvalidInput(_) => ErrorKind::InvalidInput,
            CrawlerError::Fetch(e) => e.kind(),
            CrawlerError::Subscription(e) => e.kind(),
            CrawlerError::Repository(RepositoryError::InvalidInput(_)) => ErrorKind::InvalidInput,
            CrawlerError::Repository(_) => ErrorKind::Unexpected,
        }
    }
}
