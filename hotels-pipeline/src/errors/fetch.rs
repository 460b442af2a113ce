//! Errors raised by hotel fetchers.
use thiserror::Error;

use crate::errors::ErrorKind;

/// Represents errors that can occur while fetching hotel data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The remote source failed or returned something unusable.
    #[error("Remote fetch error: {0}")]
    Remote(String),
    #[error("Unexpected fetch error: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Remote(_) => ErrorKind::Remote,
            FetchError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Unexpected(err.to_string())
        } else {
            Self::Remote(err.to_string())
        }
    }
}
