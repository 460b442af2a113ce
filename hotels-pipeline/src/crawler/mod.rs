//! Crawler keeping the permanent store in sync with the hotel registry.
//!
//! A hotel is synced part by part: `meta` announces which other parts exist,
//! those are fetched concurrently and a failure of one part never aborts its
//! siblings. A catalog sync fans out over every listed hotel and finally
//! purges hotels it did not refresh.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use hotels_repository::HotelRepository;
use hotels_shared::{HotelPart, Job, PartName};
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use crate::errors::{CrawlerError, ErrorKind};
use crate::fetcher::HotelFetcher;
use crate::log_by_kind;
use crate::queue::Queue;
use crate::subscription::SubscriptionService;

mod handlers;

pub use handlers::{register_processors, DeleteHotelHandler, SyncAllHandler, SyncHotelHandler};

/// Crawler behaviour switches.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Enqueue `indexHotel` after every write.
    pub trigger_indexing: bool,
    /// Subscribe for notifications announced by hotel descriptions.
    pub subscribe_for_notifications: bool,
    /// Maximum number of hotels synced at the same time during a catalog sync.
    pub max_concurrent_syncs: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            trigger_indexing: true,
            subscribe_for_notifications: true,
            max_concurrent_syncs: 10,
        }
    }
}

#[derive(Clone)]
pub struct Crawler {
    fetcher: Arc<dyn HotelFetcher>,
    hotels: Arc<dyn HotelRepository>,
    subscriptions: Arc<dyn SubscriptionService>,
    queue: Queue,
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn HotelFetcher>,
        hotels: Arc<dyn HotelRepository>,
        subscriptions: Arc<dyn SubscriptionService>,
        queue: Queue,
        config: CrawlerConfig,
    ) -> Self {
        Self {
            fetcher,
            hotels,
            subscriptions,
            queue,
            config,
        }
    }

    /// Fetches and stores every available part of one hotel.
    ///
    /// `meta` is stored as soon as it is fetched. Failures of individual
    /// parts are logged and skipped. A failure to fetch `meta` or to persist
    /// is logged and returned.
    #[instrument(skip(self))]
    pub async fn sync_hotel(&self, hotel_address: &str) -> Result<(), CrawlerError> {
        if hotel_address.is_empty() {
            return Err(CrawlerError::invalid_input(
                "hotel address is required to sync a hotel",
            ));
        }

        let result = self.sync_hotel_parts(hotel_address).await;
        if let Err(e) = &result {
            log_by_kind!(
                e.kind(),
                hotel_address = %hotel_address,
                error = %e,
                "Failed to sync hotel"
            );
        }
        result
    }

    async fn sync_hotel_parts(&self, hotel_address: &str) -> Result<(), CrawlerError> {
        debug!(hotel_address = %hotel_address, "Fetching hotel meta");
        let meta = self.fetcher.fetch_meta(hotel_address).await?;
        // Keeps a listed hotel in the store even when none of its parts can be fetched.
        self.hotels
            .upsert(&[HotelPart::new(hotel_address, PartName::Meta, meta.clone())])
            .await?;

        let fetches = PartName::SERVED
            .into_iter()
            .filter(|part_name| meta.get(part_name.uri_key()).is_some_and(Value::is_string))
            .map(|part_name| self.fetch_part(hotel_address, part_name));
        let parts: Vec<HotelPart> = join_all(fetches).await.into_iter().flatten().collect();

        let notifications_uri = parts
            .iter()
            .find(|part| part.part_name == PartName::Description)
            .and_then(|part| part.raw_data.get("notificationsUri"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        if parts.is_empty() {
            debug!(hotel_address = %hotel_address, "No data available for hotel");
        } else {
            debug!(hotel_address = %hotel_address, part_count = parts.len(), "Saving hotel");
            self.hotels.upsert(&parts).await?;
            if self.config.trigger_indexing {
                self.queue.enqueue(Job::index_hotel(hotel_address));
            }
        }

        if self.config.subscribe_for_notifications {
            if let Some(uri) = notifications_uri {
                self.subscribe(hotel_address, &uri).await?;
            }
        }
        Ok(())
    }

    /// Fetches one part, logging and swallowing its failure.
    async fn fetch_part(&self, hotel_address: &str, part_name: PartName) -> Option<HotelPart> {
        debug!(hotel_address = %hotel_address, part_name = %part_name, "Fetching hotel part");
        match self.fetcher.fetch_part(hotel_address, part_name).await {
            Ok(raw_data) => Some(HotelPart::new(hotel_address, part_name, raw_data)),
            Err(e) => {
                log_by_kind!(
                    e.kind(),
                    hotel_address = %hotel_address,
                    part_name = %part_name,
                    error = %e,
                    "Failed to fetch hotel part"
                );
                None
            }
        }
    }

    async fn subscribe(&self, hotel_address: &str, uri: &str) -> Result<(), CrawlerError> {
        match self.subscriptions.subscribe_if_needed(uri, hotel_address).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::Remote => {
                info!(
                    hotel_address = %hotel_address,
                    error = %e,
                    "Could not subscribe for notifications"
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Syncs the whole catalog and purges hotels that were not refreshed.
    ///
    /// Individual hotel failures are logged by [`Crawler::sync_hotel`] and
    /// ignored. A failure of the hotel list itself is returned once the
    /// already started syncs have settled, and nothing is purged.
    ///
    /// # Returns
    ///
    /// The addresses of the purged hotels.
    #[instrument(skip(self))]
    pub async fn sync_all_hotels(&self) -> Result<Vec<String>, CrawlerError> {
        let sync_started = Utc::now();
        let limiter = Arc::new(Semaphore::new(self.config.max_concurrent_syncs.max(1)));
        let mut tasks = JoinSet::new();

        debug!("Fetching hotel list");
        let listed = {
            let mut on_every_page = |addresses: Vec<String>| {
                for hotel_address in addresses {
                    let crawler = self.clone();
                    let limiter = limiter.clone();
                    tasks.spawn(async move {
                        let Ok(_permit) = limiter.acquire_owned().await else {
                            return;
                        };
                        // Already logged by sync_hotel.
                        let _ = crawler.sync_hotel(&hotel_address).await;
                    });
                }
            };
            self.fetcher.fetch_hotel_list(&mut on_every_page).await
        };

        let hotel_count = tasks.len();
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "Hotel sync task panicked");
            }
        }

        if let Err(e) = listed {
            log_by_kind!(e.kind(), error = %e, "Failed to fetch hotel list");
            return Err(e.into());
        }

        info!(hotel_count, "Catalog sync finished");
        self.delete_obsolete(sync_started).await
    }

    /// Removes a hotel from the permanent store.
    #[instrument(skip(self))]
    pub async fn delete_hotel(&self, hotel_address: &str) -> Result<(), CrawlerError> {
        if hotel_address.is_empty() {
            return Err(CrawlerError::invalid_input(
                "hotel address is required to delete a hotel",
            ));
        }
        debug!(hotel_address = %hotel_address, "Deleting hotel");
        self.hotels.delete(hotel_address).await?;
        if self.config.trigger_indexing {
            self.queue.enqueue(Job::index_hotel(hotel_address));
        }
        Ok(())
    }

    /// Purges parts not refreshed since `cutoff` and enqueues a reindex of
    /// every hotel that lost a part.
    pub async fn delete_obsolete(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<String>, CrawlerError> {
        let addresses = self.hotels.delete_obsolete(cutoff, None).await?;
        for hotel_address in &addresses {
            self.queue.enqueue(Job::index_hotel(hotel_address.as_str()));
        }
        if !addresses.is_empty() {
            info!(hotel_count = addresses.len(), "Purged obsolete hotel parts");
        }
        Ok(addresses)
    }
}
