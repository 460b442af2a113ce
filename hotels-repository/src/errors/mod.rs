//! Error types for the hotel indexer repositories.

mod repository;

pub use repository::RepositoryError;
