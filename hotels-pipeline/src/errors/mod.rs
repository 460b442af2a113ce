//! Error types for the hotel indexer pipeline.
//!
//! Every error exposes an [`ErrorKind`] through `kind()`. The kind alone
//! decides the log severity and whether a failed job is worth re-delivering.
mod crawler;
mod fetch;
mod indexer;
mod kind;
mod queue;
mod subscription;
mod validation;

pub use crawler::CrawlerError;
pub use fetch::FetchError;
pub use indexer::IndexerError;
pub use kind::ErrorKind;
pub use queue::{JobError, QueueError};
pub use subscription::SubscriptionError;
pub use validation::ValidationError;
