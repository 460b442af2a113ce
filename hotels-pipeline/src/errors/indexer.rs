//! Error types for the location indexer.
use hotels_repository::RepositoryError;
use thiserror::Error;

use crate::errors::{ErrorKind, ValidationError};

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid query: {0}")]
    Validation(#[from] ValidationError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl IndexerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexerError::InvalidInput(_) => ErrorKind::InvalidInput,
            IndexerError::Validation(e) => e.kind(),
            IndexerError::Repository(RepositoryError::InvalidInput(_)) => ErrorKind::InvalidInput,
            IndexerError::Repository(_) => ErrorKind::Unexpected,
        }
    }
}
