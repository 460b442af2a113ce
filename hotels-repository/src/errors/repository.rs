use thiserror::Error;

/// Represents errors that can occur within the hotel and location repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Missing or malformed argument. Raised before any statement is executed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid part name: {0}")]
    InvalidPartName(String),
}

impl RepositoryError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
