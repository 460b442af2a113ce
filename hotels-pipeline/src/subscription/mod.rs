//! Notification subscriptions for crawled hotels.
use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::SubscriptionError;

/// Registers this indexer for update notifications about a hotel.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Subscribes at the notification endpoint `uri` unless already subscribed.
    async fn subscribe_if_needed(&self, uri: &str, hotel_address: &str)
        -> Result<(), SubscriptionError>;
}

/// Subscribes over HTTP and remembers every `(uri, hotel)` pair it subscribed.
pub struct NotificationSubscriber {
    client: Client,
    /// Where the notification service should deliver updates.
    callback_url: Option<String>,
    subscribed: Mutex<HashSet<(String, String)>>,
}

impl NotificationSubscriber {
    pub fn new(callback_url: Option<String>, timeout: Duration) -> Result<Self, SubscriptionError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SubscriptionError::unexpected(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            callback_url,
            subscribed: Mutex::new(HashSet::new()),
        })
    }
}

#[async_trait]
impl SubscriptionService for NotificationSubscriber {
    async fn subscribe_if_needed(
        &self,
        uri: &str,
        hotel_address: &str,
    ) -> Result<(), SubscriptionError> {
        let Some(callback_url) = self.callback_url.as_deref() else {
            debug!(
                hotel_address = %hotel_address,
                "No callback URL configured, skipping subscription"
            );
            return Ok(());
        };

        let key = (uri.to_string(), hotel_address.to_string());
        if self.subscribed.lock().await.contains(&key) {
            return Ok(());
        }

        let url = format!("{}/subscriptions", uri.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "url": callback_url,
                "resourceType": "hotel",
                "resourceAddress": hotel_address,
            }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubscriptionError::remote(format!(
                "{url} responded with {status}"
            )));
        }

        info!(
            hotel_address = %hotel_address,
            notifications_uri = %uri,
            "Subscribed for notifications"
        );
        self.subscribed.lock().await.insert(key);
        Ok(())
    }
}
