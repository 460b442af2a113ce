//! Query request shapes.
//!
//! These types mirror the `{filters: [...], sorting: {...}}` request body that
//! is validated before being compiled into store-level query fragments. The
//! conditions stay as raw JSON here because filter types other than `location`
//! are composed elsewhere.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A filter/sort request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortSpec>,
}

/// One entry of the `filters` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub condition: Value,
}

/// The `sorting` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// Condition of a `location` filter. `distance` is in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationCondition {
    pub lat: f64,
    pub lng: f64,
    pub distance: f64,
}

/// Reference point of a `distance` sort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistanceData {
    pub lat: f64,
    pub lng: f64,
}
