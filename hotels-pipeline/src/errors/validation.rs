//! Error returned for malformed filter and sort requests.
use thiserror::Error;

use crate::errors::ErrorKind;

/// A rejected request field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    /// Path of the offending field, e.g. `filters[0].condition.lng`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
