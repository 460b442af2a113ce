//! This module defines the `HotelRepository` trait, the interface of the
//! permanent store. The permanent store caches the raw documents fetched for
//! every hotel, one row per `(address, part_name)`.
use chrono::{DateTime, Utc};
use hotels_shared::{HotelData, HotelPart, PartName};

use crate::errors::RepositoryError;

/// A trait that defines the interface of the permanent store.
#[async_trait::async_trait]
pub trait HotelRepository: Send + Sync {
    /// Inserts or updates hotel parts.
    ///
    /// Each part first updates the row matching its `(address, part_name)`;
    /// parts that matched nothing are inserted together in one batch. Updated
    /// rows keep their `created_at` and get a fresh `updated_at`.
    ///
    /// # Arguments
    ///
    /// * `parts` - Parts to persist. Must not be empty.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All parts written
    /// * `Err(RepositoryError::InvalidInput)` - `parts` is empty or a part has no address
    async fn upsert(&self, parts: &[HotelPart]) -> Result<(), RepositoryError>;

    /// Returns the stored documents of a hotel, restricted to `part_names`.
    ///
    /// Use [`PartName::SERVED`] for the default set, which leaves out `meta`.
    async fn get_hotel_data(
        &self,
        address: &str,
        part_names: &[PartName],
    ) -> Result<HotelData, RepositoryError>;

    /// Returns up to `limit` distinct hotel addresses in ascending order,
    /// starting at `start_with` (inclusive) when given.
    ///
    /// This is a temporary cursor primitive for catalog-wide walks; it is not
    /// aware of any sorting or filtering.
    async fn get_addresses(
        &self,
        limit: u32,
        start_with: Option<&str>,
    ) -> Result<Vec<String>, RepositoryError>;

    /// Deletes parts last updated before `cutoff`, optionally only for the
    /// addresses in `limit_to`.
    ///
    /// # Returns
    ///
    /// The distinct addresses of the deleted parts, read before deletion.
    /// A hotel that kept some fresh parts is reported too, since losing a
    /// part may change what is indexed for it.
    async fn delete_obsolete(
        &self,
        cutoff: DateTime<Utc>,
        limit_to: Option<&[String]>,
    ) -> Result<Vec<String>, RepositoryError>;

    /// Removes every part of a hotel. Returns the number of deleted rows.
    async fn delete(&self, address: &str) -> Result<u64, RepositoryError>;
}
