//! # Hotels Repository
//!
//! This crate provides traits and implementations for the two stores of the
//! hotel indexer: the permanent store holding raw hotel parts and the indexed
//! store holding derived locations. It includes definitions for errors,
//! interfaces, and concrete implementations for SQLite.

pub mod errors;
pub mod interfaces;
pub mod sqlite;
pub mod types;

pub use errors::RepositoryError;
pub use interfaces::{HotelRepository, LocationRepository};
pub use sqlite::{SqliteHotelRepository, SqliteLocationRepository};
pub use types::LocationMatch;
