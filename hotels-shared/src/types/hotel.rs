//! Hotel part types.
//!
//! A hotel is stored as a set of independently fetched documents ("parts").
//! Each part is the cached copy of one remote document type for one hotel.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of a hotel part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartName {
    Description,
    RatePlans,
    Availability,
    Meta,
}

impl PartName {
    /// Every part name, in storage order.
    pub const ALL: [PartName; 4] = [
        PartName::Description,
        PartName::RatePlans,
        PartName::Availability,
        PartName::Meta,
    ];

    /// Parts served to readers. `meta` is fetch-time metadata only.
    pub const SERVED: [PartName; 3] = [
        PartName::Description,
        PartName::RatePlans,
        PartName::Availability,
    ];

    /// The name as stored in the `part_name` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartName::Description => "description",
            PartName::RatePlans => "ratePlans",
            PartName::Availability => "availability",
            PartName::Meta => "meta",
        }
    }

    /// Key under which the `meta` document announces this part, e.g. `ratePlansUri`.
    pub fn uri_key(&self) -> String {
        format!("{}Uri", self.as_str())
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartName::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| format!("unknown part name: {s}"))
    }
}

/// One part document of one hotel, as written to the permanent store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPart {
    pub address: String,
    pub part_name: PartName,
    pub raw_data: Value,
}

impl HotelPart {
    pub fn new(address: impl Into<String>, part_name: PartName, raw_data: Value) -> Self {
        Self {
            address: address.into(),
            part_name,
            raw_data,
        }
    }
}

/// All stored parts of a hotel, keyed by part name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelData {
    pub address: String,
    pub data: HashMap<PartName, Value>,
}

impl HotelData {
    /// Create an aggregate with no parts.
    pub fn empty(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            data: HashMap::new(),
        }
    }

    /// Builder-style helper used mostly by tests and fixtures.
    pub fn with_part(mut self, part_name: PartName, raw_data: Value) -> Self {
        self.data.insert(part_name, raw_data);
        self
    }

    pub fn part(&self, part_name: PartName) -> Option<&Value> {
        self.data.get(&part_name)
    }

    pub fn description(&self) -> Option<&Value> {
        self.part(PartName::Description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_part_name_round_trips_through_str() {
        for part in PartName::ALL {
            assert_eq!(part.as_str().parse::<PartName>().unwrap(), part);
        }
        assert!("photos".parse::<PartName>().is_err());
    }

    #[test]
    fn test_part_name_serializes_camel_case() {
        assert_eq!(serde_json::to_value(PartName::RatePlans).unwrap(), json!("ratePlans"));
        assert_eq!(PartName::RatePlans.uri_key(), "ratePlansUri");
    }

    #[test]
    fn test_hotel_data_serializes_with_part_keys() {
        let hotel = HotelData::empty("0xdummy")
            .with_part(PartName::Description, json!({ "name": "Hotel" }));
        let value = serde_json::to_value(&hotel).unwrap();
        assert_eq!(value["address"], "0xdummy");
        assert_eq!(value["data"]["description"]["name"], "Hotel");
        assert!(hotel.part(PartName::Meta).is_none());
    }
}
