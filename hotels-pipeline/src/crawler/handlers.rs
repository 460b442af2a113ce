//! Queue handlers for the crawler jobs.
use std::sync::Arc;

use async_trait::async_trait;
use hotels_shared::{JobKind, JobPayload};

use crate::crawler::Crawler;
use crate::errors::{CrawlerError, JobError, QueueError};
use crate::queue::{JobHandler, Worker};

fn required_address(payload: &JobPayload) -> Result<&str, CrawlerError> {
    payload
        .hotel_address
        .as_deref()
        .ok_or_else(|| CrawlerError::invalid_input("hotelAddress is required"))
}

/// Handles `syncHotel`.
pub struct SyncHotelHandler {
    crawler: Crawler,
}

#[async_trait]
impl JobHandler for SyncHotelHandler {
    async fn handle(&self, payload: JobPayload) -> Result<(), JobError> {
        let hotel_address = required_address(&payload)?;
        self.crawler.sync_hotel(hotel_address).await?;
        Ok(())
    }
}

/// Handles `syncAll`.
pub struct SyncAllHandler {
    crawler: Crawler,
}

#[async_trait]
impl JobHandler for SyncAllHandler {
    async fn handle(&self, _payload: JobPayload) -> Result<(), JobError> {
        self.crawler.sync_all_hotels().await?;
        Ok(())
    }
}

/// Handles `deleteHotel`.
pub struct DeleteHotelHandler {
    crawler: Crawler,
}

#[async_trait]
impl JobHandler for DeleteHotelHandler {
    async fn handle(&self, payload: JobPayload) -> Result<(), JobError> {
        let hotel_address = required_address(&payload)?;
        self.crawler.delete_hotel(hotel_address).await?;
        Ok(())
    }
}

/// Registers the `syncHotel`, `syncAll` and `deleteHotel` handlers.
pub fn register_processors(worker: &mut Worker, crawler: Crawler) -> Result<(), QueueError> {
    worker.register(
        JobKind::SyncHotel,
        Arc::new(SyncHotelHandler {
            crawler: crawler.clone(),
        }),
    )?;
    worker.register(
        JobKind::SyncAll,
        Arc::new(SyncAllHandler {
            crawler: crawler.clone(),
        }),
    )?;
    worker.register(JobKind::DeleteHotel, Arc::new(DeleteHotelHandler { crawler }))?;
    Ok(())
}
