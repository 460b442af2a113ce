//! Remote hotel data sources.
//!
//! The crawler only talks to a [`HotelFetcher`]. [`ReadApiFetcher`] is the
//! production implementation over the registry read API.
use async_trait::async_trait;
use hotels_shared::PartName;
use serde_json::Value;

use crate::errors::FetchError;

mod read_api;

pub use read_api::{ReadApiFetcher, ReadApiFetcherConfig};

/// Callback invoked with the addresses of every catalog page.
pub type PageCallback<'a> = dyn FnMut(Vec<String>) + Send + 'a;

/// A trait that defines how raw hotel documents are obtained.
#[async_trait]
pub trait HotelFetcher: Send + Sync {
    /// Walks the whole hotel catalog, calling `on_every_page` once per page.
    async fn fetch_hotel_list(&self, on_every_page: &mut PageCallback<'_>)
        -> Result<(), FetchError>;

    async fn fetch_description(&self, address: &str) -> Result<Value, FetchError>;

    async fn fetch_rate_plans(&self, address: &str) -> Result<Value, FetchError>;

    async fn fetch_availability(&self, address: &str) -> Result<Value, FetchError>;

    /// Fetches the index document announcing which other parts exist.
    async fn fetch_meta(&self, address: &str) -> Result<Value, FetchError>;

    /// Fetches one part by name.
    async fn fetch_part(&self, address: &str, part_name: PartName) -> Result<Value, FetchError> {
        match part_name {
            PartName::Description => self.fetch_description(address).await,
            PartName::RatePlans => self.fetch_rate_plans(address).await,
            PartName::Availability => self.fetch_availability(address).await,
            PartName::Meta => self.fetch_meta(address).await,
        }
    }
}
