//! # Hotels Indexer
//!
//! Service keeping a local copy of the hotel registry and a location index
//! over it.
//!
//! ## Architecture
//!
//! 1. **Crawler**: fetches hotels from the registry read API into SQLite
//! 2. **Queue / Worker**: runs crawl and index jobs with bounded concurrency
//! 3. **Indexer**: recomputes the location of every changed hotel
//! 4. **Orchestrator**: schedules catalog syncs and owns the shutdown
//!
//! ## Modules
//!
//! - [`config`]: Settings and dependency initialization
//! - [`orchestrator`]: Sync scheduling and worker lifecycle
//! - [`errors`]: Error types for the service

pub mod config;
pub mod errors;
pub mod orchestrator;

pub use config::{Dependencies, Settings};
pub use errors::IndexingError;
