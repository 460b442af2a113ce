//! Location index row.

use serde::{Deserialize, Serialize};

/// Indexed position of a hotel, derived from its `description` part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub hotel_address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(hotel_address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            hotel_address: hotel_address.into(),
            lat,
            lng,
        }
    }
}
