//! Mock collaborators shared by the pipeline integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hotels_pipeline::errors::{FetchError, SubscriptionError};
use hotels_pipeline::fetcher::{HotelFetcher, PageCallback};
use hotels_pipeline::subscription::SubscriptionService;
use hotels_pipeline::JobReceiver;
use hotels_repository::sqlite::{connect_in_memory, run_migrations};
use hotels_repository::{SqliteHotelRepository, SqliteLocationRepository};
use hotels_shared::{Job, PartName};
use serde_json::{json, Value};

/// In-memory registry serving canned documents.
#[derive(Default)]
pub struct MockFetcher {
    pages: Vec<Vec<String>>,
    list_error: Option<FetchError>,
    documents: HashMap<(String, PartName), Result<Value, FetchError>>,
    calls: Mutex<Vec<(String, PartName)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one page of the hotel catalog.
    pub fn with_page(mut self, addresses: &[&str]) -> Self {
        self.pages
            .push(addresses.iter().map(|a| a.to_string()).collect());
        self
    }

    /// Fails the catalog walk after all pages were delivered.
    pub fn with_list_error(mut self, error: FetchError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn with_part(
        mut self,
        address: &str,
        part_name: PartName,
        document: Result<Value, FetchError>,
    ) -> Self {
        self.documents
            .insert((address.to_string(), part_name), document);
        self
    }

    /// Adds a hotel whose meta announces and serves every part.
    pub fn with_hotel(self, address: &str, description: Value) -> Self {
        self.with_part(
            address,
            PartName::Meta,
            Ok(json!({
                "descriptionUri": format!("http://storage.test/{address}/description"),
                "ratePlansUri": format!("http://storage.test/{address}/ratePlans"),
                "availabilityUri": format!("http://storage.test/{address}/availability"),
            })),
        )
        .with_part(address, PartName::Description, Ok(description))
        .with_part(address, PartName::RatePlans, Ok(json!({ "basic": { "price": 100 } })))
        .with_part(address, PartName::Availability, Ok(json!({ "latestSnapshot": {} })))
    }

    pub fn calls(&self) -> Vec<(String, PartName)> {
        self.calls.lock().unwrap().clone()
    }

    fn document(&self, address: &str, part_name: PartName) -> Result<Value, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), part_name));
        self.documents
            .get(&(address.to_string(), part_name))
            .cloned()
            .unwrap_or_else(|| Err(FetchError::remote(format!("{address}/{part_name} not found"))))
    }
}

#[async_trait]
impl HotelFetcher for MockFetcher {
    async fn fetch_hotel_list(
        &self,
        on_every_page: &mut PageCallback<'_>,
    ) -> Result<(), FetchError> {
        for page in &self.pages {
            on_every_page(page.clone());
        }
        match &self.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn fetch_description(&self, address: &str) -> Result<Value, FetchError> {
        self.document(address, PartName::Description)
    }

    async fn fetch_rate_plans(&self, address: &str) -> Result<Value, FetchError> {
        self.document(address, PartName::RatePlans)
    }

    async fn fetch_availability(&self, address: &str) -> Result<Value, FetchError> {
        self.document(address, PartName::Availability)
    }

    async fn fetch_meta(&self, address: &str) -> Result<Value, FetchError> {
        self.document(address, PartName::Meta)
    }
}

/// Records subscriptions and optionally fails them.
#[derive(Default)]
pub struct MockSubscriptions {
    failure: Option<SubscriptionError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: SubscriptionError) -> Self {
        Self {
            failure: Some(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionService for MockSubscriptions {
    async fn subscribe_if_needed(
        &self,
        uri: &str,
        hotel_address: &str,
    ) -> Result<(), SubscriptionError> {
        self.calls
            .lock()
            .unwrap()
            .push((uri.to_string(), hotel_address.to_string()));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Fresh, migrated in-memory stores sharing one database.
pub async fn stores() -> (Arc<SqliteHotelRepository>, Arc<SqliteLocationRepository>) {
    let pool = connect_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    (
        Arc::new(SqliteHotelRepository::new(pool.clone())),
        Arc::new(SqliteLocationRepository::new(pool)),
    )
}

/// Drains every job that is already enqueued.
pub fn drain(receiver: &mut JobReceiver) -> Vec<Job> {
    let mut jobs = Vec::new();
    while let Some(job) = receiver.try_recv() {
        jobs.push(job);
    }
    jobs
}

/// Addresses of the drained `indexHotel` jobs, sorted.
pub fn indexed_addresses(receiver: &mut JobReceiver) -> Vec<String> {
    let mut addresses: Vec<String> = drain(receiver)
        .into_iter()
        .filter(|job| job.kind == hotels_shared::JobKind::IndexHotel)
        .filter_map(|job| job.payload.hotel_address)
        .collect();
    addresses.sort();
    addresses
}
