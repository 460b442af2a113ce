//! # Hotels Pipeline
//!
//! This crate keeps the hotel store and its location index up to date.
//!
//! - [`crawler`]: fetches hotel parts from the registry into the permanent store
//! - [`queue`]: job queue and worker decoupling crawl-time writes from indexing
//! - [`indexer`]: projects hotels into the location index and runs proximity queries
//! - [`validators`]: checks filter and sort requests before they are compiled
//! - [`fetcher`], [`subscription`]: external collaborators and their HTTP implementations
//! - [`errors`]: error types and their severity classification
pub mod crawler;
pub mod errors;
pub mod fetcher;
pub mod indexer;
pub mod queue;
pub mod subscription;
pub mod validators;

pub use crawler::{Crawler, CrawlerConfig};
pub use errors::ErrorKind;
pub use fetcher::{HotelFetcher, ReadApiFetcher, ReadApiFetcherConfig};
pub use indexer::Indexer;
pub use queue::{JobHandler, JobReceiver, Queue, Worker, WorkerConfig};
pub use subscription::{NotificationSubscriber, SubscriptionService};
