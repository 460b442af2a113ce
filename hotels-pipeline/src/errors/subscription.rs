//! Errors raised by the notification subscription service.
use thiserror::Error;

use crate::errors::ErrorKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The notification endpoint refused or could not be reached.
    #[error("Remote subscription error: {0}")]
    Remote(String),
    #[error("Unexpected subscription error: {0}")]
    Unexpected(String),
}

impl SubscriptionError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SubscriptionError::Remote(_) => ErrorKind::Remote,
            SubscriptionError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<reqwest::Error> for SubscriptionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Unexpected(err.to_string())
        } else {
            Self::Remote(err.to_string())
        }
    }
}
