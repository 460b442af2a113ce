use std::sync::Arc;

use async_trait::async_trait;
use hotels_repository::HotelRepository;
use hotels_shared::{JobKind, JobPayload, PartName};
use tracing::debug;

use crate::errors::{IndexerError, JobError, QueueError};
use crate::indexer::Indexer;
use crate::queue::{JobHandler, Worker};

/// Handles `indexHotel` by re-reading the hotel and reindexing it.
pub struct IndexHotelHandler {
    hotels: Arc<dyn HotelRepository>,
    indexer: Indexer,
}

impl IndexHotelHandler {
    pub fn new(hotels: Arc<dyn HotelRepository>, indexer: Indexer) -> Self {
        Self { hotels, indexer }
    }
}

#[async_trait]
impl JobHandler for IndexHotelHandler {
    async fn handle(&self, payload: JobPayload) -> Result<(), JobError> {
        let hotel_address = payload
            .hotel_address
            .as_deref()
            .ok_or_else(|| IndexerError::invalid_input("hotelAddress is required"))?;
        debug!(hotel_address = %hotel_address, "Indexing hotel");
        let hotel = self
            .hotels
            .get_hotel_data(hotel_address, &PartName::SERVED)
            .await
            .map_err(IndexerError::from)?;
        self.indexer.index_hotel(&hotel).await?;
        Ok(())
    }
}

/// Registers the `indexHotel` handler.
pub fn register_processors(
    worker: &mut Worker,
    hotels: Arc<dyn HotelRepository>,
    indexer: Indexer,
) -> Result<(), QueueError> {
    worker.register(
        JobKind::IndexHotel,
        Arc::new(IndexHotelHandler::new(hotels, indexer)),
    )
}
