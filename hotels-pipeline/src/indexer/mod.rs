//! Location index maintenance and proximity queries.
//!
//! Indexing is a recomputation from the current hotel data, never a delta,
//! so the same `indexHotel` job may be delivered any number of times and in
//! any order.
use std::sync::Arc;

use hotels_repository::{LocationMatch, LocationRepository};
use hotels_shared::{HotelData, Location, QueryRequest};
use tracing::{debug, instrument};

use crate::errors::IndexerError;

pub mod by_location;
mod handler;

pub use handler::{register_processors, IndexHotelHandler};

/// Projects hotel data into the location index.
#[derive(Clone)]
pub struct Indexer {
    locations: Arc<dyn LocationRepository>,
}

impl Indexer {
    pub fn new(locations: Arc<dyn LocationRepository>) -> Self {
        Self { locations }
    }

    /// Upserts the hotel location, or deletes it when the hotel has none.
    #[instrument(skip(self, hotel), fields(hotel_address = %hotel.address))]
    pub async fn index_hotel(&self, hotel: &HotelData) -> Result<(), IndexerError> {
        if hotel.address.is_empty() {
            return Err(IndexerError::invalid_input(
                "hotel address is required to index a hotel",
            ));
        }

        match resolve_location(hotel) {
            Some(location) => {
                debug!(lat = location.lat, lng = location.lng, "Indexing hotel location");
                self.locations.upsert(&location).await?;
            }
            None => {
                let removed = self.locations.delete(&hotel.address).await?;
                debug!(removed, "Hotel has no location");
            }
        }
        Ok(())
    }

    /// Compiles the location filters and distance sorting of `query` and runs
    /// them against the index.
    ///
    /// Filters of other types are ignored. The query is expected to have
    /// passed [`crate::validators`] already; coordinates are not range-checked here.
    pub async fn search(
        &self,
        query: &QueryRequest,
        limit: Option<u32>,
    ) -> Result<Vec<LocationMatch>, IndexerError> {
        let filters = by_location::get_filtering(query)?.unwrap_or_default();
        let sorting = by_location::get_sorting(query)?;
        let matches = self
            .locations
            .search(&filters, sorting.as_ref(), limit)
            .await?;
        Ok(matches)
    }
}

/// Reads `description.location.{latitude,longitude}` when both are numbers.
fn resolve_location(hotel: &HotelData) -> Option<Location> {
    let location = hotel.description()?.get("location")?;
    let lat = location.get("latitude")?.as_f64()?;
    let lng = location.get("longitude")?.as_f64()?;
    Some(Location::new(hotel.address.as_str(), lat, lng))
}
