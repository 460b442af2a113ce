//! Proximity filtering and distance sorting over the location index.
//!
//! Filters are bounding boxes: a circle of `distance` km is approximated by
//! the rectangle of `±Δlat`, `±Δlng` degrees around its center. Sorting uses
//! an equirectangular approximation, which is accurate to a few hundred
//! meters at city scale and keeps the ordering correct far beyond that.
//!
//! Neither the poles nor the antimeridian are handled: boxes are not wrapped
//! around ±180° and `Δlng` grows without bound as `|lat|` approaches 90°.
use hotels_shared::{
    BoundingBox, DistanceData, LocationCondition, LocationFilter, LocationSorting, QueryRequest,
    KILOMETERS_PER_DEGREE, LOCATION_TABLE,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ValidationError;

/// Filter type handled by this module.
pub const FILTER_TYPE: &str = "location";
/// Sorting type handled by this module.
pub const SORTING_TYPE: &str = "distance";
/// Name of the computed sort column.
pub const DISTANCE_COLUMN: &str = "distance";

/// Degree deltas equivalent to a distance at some reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degrees {
    pub lat: f64,
    pub lng: f64,
}

/// Converts `km` into latitude and longitude deltas at `(lat, _lng)`.
///
/// One degree of latitude is the same length everywhere; a degree of
/// longitude shrinks with `cos(lat)`. Only the magnitude of the latitude
/// matters, so both hemispheres give the same result.
pub fn convert_kilometers_to_degrees(lat: f64, _lng: f64, km: f64) -> Degrees {
    Degrees {
        lat: km / KILOMETERS_PER_DEGREE,
        lng: km / (KILOMETERS_PER_DEGREE * lat.to_radians().cos().abs()),
    }
}

/// Bounding-box filter of hotels within roughly `km` of `(lat, lng)`.
pub fn location_filter(lat: f64, lng: f64, km: f64) -> LocationFilter {
    let delta = convert_kilometers_to_degrees(lat, lng, km);
    LocationFilter {
        table: LOCATION_TABLE.to_string(),
        condition: BoundingBox::around(lat, lng, delta.lat, delta.lng),
    }
}

/// Sorting by approximate distance from `(lat, lng)`.
///
/// The computed column holds `Δlat² + Δlng²·cos²(lat)` in squared degrees;
/// [`LocationSorting::compute_score`] turns it into kilometers.
pub fn distance_sorting(lat: f64, lng: f64) -> LocationSorting {
    LocationSorting {
        name: SORTING_TYPE.to_string(),
        table: LOCATION_TABLE.to_string(),
        column_name: DISTANCE_COLUMN.to_string(),
        origin_lat: lat,
        origin_lng: lng,
        lng_scale: lat.to_radians().cos().powi(2),
    }
}

fn parse<T: DeserializeOwned>(value: &Value, field: String) -> Result<T, ValidationError> {
    serde_json::from_value(value.clone()).map_err(|e| ValidationError::new(field, e.to_string()))
}

/// Compiles every `location` filter of `query`.
///
/// # Returns
///
/// * `Ok(None)` - The query has no `location` filter
/// * `Err(ValidationError)` - A `location` condition is malformed
pub fn get_filtering(
    query: &QueryRequest,
) -> Result<Option<Vec<LocationFilter>>, ValidationError> {
    let mut filters = Vec::new();
    for (i, filter) in query.filters.iter().enumerate() {
        if filter.kind != FILTER_TYPE {
            continue;
        }
        let condition: LocationCondition =
            parse(&filter.condition, format!("filters[{i}].condition"))?;
        filters.push(location_filter(
            condition.lat,
            condition.lng,
            condition.distance,
        ));
    }
    Ok((!filters.is_empty()).then_some(filters))
}

/// Compiles the `distance` sorting of `query`, if it has one.
pub fn get_sorting(query: &QueryRequest) -> Result<Option<LocationSorting>, ValidationError> {
    let Some(sorting) = query.sorting.as_ref() else {
        return Ok(None);
    };
    if sorting.kind != SORTING_TYPE {
        return Ok(None);
    }
    let data: DistanceData = parse(&sorting.data, "sorting.data".to_string())?;
    Ok(Some(distance_sorting(data.lat, data.lng)))
}
