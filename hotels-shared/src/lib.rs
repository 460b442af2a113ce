//! # Hotels Shared
//!
//! This crate defines shared data structures and types used across the hotel
//! crawler, the permanent and indexed stores, and the location index.

pub mod types;

pub use types::geo::{
    BoundingBox, LocationFilter, LocationSorting, EARTH_RADIUS_KM, KILOMETERS_PER_DEGREE,
    LOCATION_TABLE,
};
pub use types::hotel::{HotelData, HotelPart, PartName};
pub use types::job::{Job, JobKind, JobPayload};
pub use types::location::Location;
pub use types::query::{DistanceData, FilterSpec, LocationCondition, QueryRequest, SortSpec};
