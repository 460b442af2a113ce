//! This module defines the `LocationRepository` trait, the interface of the
//! indexed store holding one position per hotel.
use hotels_shared::{Location, LocationFilter, LocationSorting};

use crate::errors::RepositoryError;
use crate::types::LocationMatch;

/// A trait that defines the interface of the location index.
#[async_trait::async_trait]
pub trait LocationRepository: Send + Sync {
    /// Creates or overwrites the location of a hotel.
    async fn upsert(&self, location: &Location) -> Result<(), RepositoryError>;

    /// Removes the location of a hotel. Removing a missing row is not an error.
    async fn delete(&self, hotel_address: &str) -> Result<u64, RepositoryError>;

    async fn get(&self, hotel_address: &str) -> Result<Option<Location>, RepositoryError>;

    /// Runs compiled filter and sort descriptors against the index.
    ///
    /// All filters must hold. With a sorting, results are ordered by its
    /// computed column ascending and carry the distance in kilometers.
    async fn search(
        &self,
        filters: &[LocationFilter],
        sorting: Option<&LocationSorting>,
        limit: Option<u32>,
    ) -> Result<Vec<LocationMatch>, RepositoryError>;
}
