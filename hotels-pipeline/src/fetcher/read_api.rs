use std::time::Duration;

use async_trait::async_trait;
use hotels_shared::PartName;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::FetchError;
use crate::fetcher::{HotelFetcher, PageCallback};

/// Settings of the read API client.
#[derive(Debug, Clone)]
pub struct ReadApiFetcherConfig {
    /// Base URL of the read API, without a trailing slash.
    pub read_api_url: String,
    pub timeout: Duration,
    /// Number of hotels requested per catalog page.
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
struct HotelListPage {
    #[serde(default)]
    items: Vec<HotelListItem>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HotelListItem {
    id: String,
}

/// Fetches hotel documents from the registry read API over HTTP.
pub struct ReadApiFetcher {
    client: Client,
    config: ReadApiFetcherConfig,
}

impl ReadApiFetcher {
    pub fn new(config: ReadApiFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::unexpected(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn part_url(&self, address: &str, part_name: PartName) -> String {
        format!(
            "{}/hotels/{}/{}",
            self.config.read_api_url.trim_end_matches('/'),
            address,
            part_name.as_str()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url = %url, "Requesting read API");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::remote(format!("{url} responded with {status}")));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::remote(format!("Malformed response from {url}: {e}")))
    }
}

#[async_trait]
impl HotelFetcher for ReadApiFetcher {
    async fn fetch_hotel_list(
        &self,
        on_every_page: &mut PageCallback<'_>,
    ) -> Result<(), FetchError> {
        let mut next = Some(format!(
            "{}/hotels?fields=id&limit={}",
            self.config.read_api_url.trim_end_matches('/'),
            self.config.page_size
        ));
        while let Some(url) = next.take() {
            let page: HotelListPage = self.get_json(&url).await?;
            on_every_page(page.items.into_iter().map(|item| item.id).collect());
            next = page.next;
        }
        Ok(())
    }

    async fn fetch_description(&self, address: &str) -> Result<Value, FetchError> {
        self.get_json(&self.part_url(address, PartName::Description)).await
    }

    async fn fetch_rate_plans(&self, address: &str) -> Result<Value, FetchError> {
        self.get_json(&self.part_url(address, PartName::RatePlans)).await
    }

    async fn fetch_availability(&self, address: &str) -> Result<Value, FetchError> {
        self.get_json(&self.part_url(address, PartName::Availability)).await
    }

    async fn fetch_meta(&self, address: &str) -> Result<Value, FetchError> {
        self.get_json(&self.part_url(address, PartName::Meta)).await
    }
}
