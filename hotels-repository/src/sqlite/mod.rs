//! SQLite implementation of the hotel indexer repositories.
//!
//! ## Database Tables
//!
//! - `hotels`: Raw hotel parts, unique on `(address, part_name)`
//! - `location`: Derived hotel positions, unique on `hotel_address`
//!
//! Both tables live in the same database and are created by the embedded
//! migrations in `migrations/`.
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::errors::RepositoryError;

mod hotel_repository;
mod location_repository;

pub use hotel_repository::SqliteHotelRepository;
pub use location_repository::SqliteLocationRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Default size of the connection pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Opens a connection pool for the given SQLite URL, e.g. `sqlite://.dev.sqlite?mode=rwc`.
pub async fn connect(database_url: &str) -> Result<SqlitePool, RepositoryError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Opens a private in-memory database.
///
/// An in-memory SQLite database lives only as long as its connection, so the
/// pool is pinned to a single connection that is never recycled.
pub async fn connect_in_memory() -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Applies all pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
