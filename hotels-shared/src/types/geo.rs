//! Store-agnostic geospatial query descriptors.
//!
//! The location index compiles filter and sort requests into these
//! descriptors; repositories translate them into their own query language.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Length of one degree of latitude (and of longitude on the equator).
pub const KILOMETERS_PER_DEGREE: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS_KM / 360.0;

/// Table backing the location index.
pub const LOCATION_TABLE: &str = "location";

/// Rectangular lat/lng range approximating a circular proximity filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Box of `±delta_lat`, `±delta_lng` degrees around a point.
    pub fn around(lat: f64, lng: f64, delta_lat: f64, delta_lng: f64) -> Self {
        Self {
            min_lat: lat - delta_lat,
            max_lat: lat + delta_lat,
            min_lng: lng - delta_lng,
            max_lng: lng + delta_lng,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// A filter over the location table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub table: String,
    pub condition: BoundingBox,
}

/// A sort by approximate distance from a reference point.
///
/// The repository computes `column_name` as
/// `(lat - origin_lat)² + (lng - origin_lng)² · lng_scale`, in squared
/// degrees. That orders correctly but is not a distance; `compute_score`
/// turns the column value back into kilometers.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSorting {
    pub name: String,
    pub table: String,
    /// Alias of the computed column. Must be a plain SQL identifier.
    pub column_name: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    /// Weight of the squared longitude delta, `cos²(origin_lat)` for distances.
    pub lng_scale: f64,
}

impl LocationSorting {
    /// Convert a raw value of `column_name` into kilometers.
    pub fn compute_score(&self, raw: f64) -> f64 {
        raw.max(0.0).sqrt() * KILOMETERS_PER_DEGREE
    }
}
