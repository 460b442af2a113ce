//! Dependency initialization and wiring for the hotel indexer.

use std::sync::Arc;

use hotels_pipeline::{
    crawler, indexer, Crawler, Indexer, NotificationSubscriber, Queue, ReadApiFetcher, Worker,
};
use hotels_repository::sqlite::{connect, run_migrations};
use hotels_repository::{HotelRepository, SqliteHotelRepository, SqliteLocationRepository};
use tracing::info;

use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::IndexingError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Connect to the store, apply migrations and wire the crawler, the
    /// indexer and the worker together.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - The store or an HTTP client could not be set up
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(database_url = %settings.database_url, "Connecting to the hotel store");
        let pool = connect(&settings.database_url).await?;
        run_migrations(&pool).await?;

        let hotels: Arc<dyn HotelRepository> = Arc::new(SqliteHotelRepository::new(pool.clone()));
        let locations = Arc::new(SqliteLocationRepository::new(pool));

        info!(read_api_url = %settings.fetcher.read_api_url, "Creating read API fetcher");
        let fetcher = Arc::new(ReadApiFetcher::new(settings.fetcher.clone())?);
        let subscriptions = Arc::new(NotificationSubscriber::new(
            settings.notifications_callback_url.clone(),
            settings.fetcher.timeout,
        )?);

        let (queue, receiver) = Queue::new();
        let crawler = Crawler::new(
            fetcher,
            hotels.clone(),
            subscriptions,
            queue.clone(),
            settings.crawler.clone(),
        );
        let indexer = Indexer::new(locations);

        let mut worker = Worker::new(queue.clone(), settings.worker.clone());
        crawler::register_processors(&mut worker, crawler)?;
        indexer::register_processors(&mut worker, hotels, indexer)?;

        let orchestrator = Orchestrator::new(worker, queue, receiver, settings.sync.clone());
        Ok(Self { orchestrator })
    }
}
