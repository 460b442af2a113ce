//! Structural and range checks for filter and sort requests.
//!
//! Requests are checked as raw JSON so that unknown keys can be reported
//! with their exact path. Nothing is coerced or dropped.
use serde_json::{Map, Value};

use crate::errors::ValidationError;
use crate::indexer::by_location::{FILTER_TYPE, SORTING_TYPE};

const FILTER_KEYS: &[&str] = &["type", "condition"];
const LOCATION_CONDITION_KEYS: &[&str] = &["lat", "lng", "distance"];
const SORT_KEYS: &[&str] = &["type", "data"];
const DISTANCE_DATA_KEYS: &[&str] = &["lat", "lng"];

/// Validates the `filters` list of a query.
pub fn validate_filter(filters: &Value) -> Result<(), ValidationError> {
    let filters = filters
        .as_array()
        .ok_or_else(|| ValidationError::new("filters", "must be an array"))?;

    for (i, filter) in filters.iter().enumerate() {
        let path = format!("filters[{i}]");
        let filter = object(filter, &path)?;
        check_keys(filter, &path, FILTER_KEYS)?;
        check_type(filter, &path, FILTER_TYPE)?;

        let condition_path = format!("{path}.condition");
        let condition = object(&filter["condition"], &condition_path)?;
        check_keys(condition, &condition_path, LOCATION_CONDITION_KEYS)?;
        check_coordinates(condition, &condition_path)?;
        let distance = number(condition, &condition_path, "distance")?;
        if distance <= 0.0 {
            return Err(ValidationError::new(
                format!("{condition_path}.distance"),
                "must be greater than 0",
            ));
        }
    }
    Ok(())
}

/// Validates the `sorting` object of a query.
pub fn validate_sort(sort: &Value) -> Result<(), ValidationError> {
    let path = "sorting";
    let sort = object(sort, path)?;
    check_keys(sort, path, SORT_KEYS)?;
    check_type(sort, path, SORTING_TYPE)?;

    let data_path = format!("{path}.data");
    let data = object(&sort["data"], &data_path)?;
    check_keys(data, &data_path, DISTANCE_DATA_KEYS)?;
    check_coordinates(data, &data_path)
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "must be an object"))
}

/// Every key in `keys` is required and no other key is allowed.
fn check_keys(
    object: &Map<String, Value>,
    path: &str,
    keys: &[&str],
) -> Result<(), ValidationError> {
    if let Some(unknown) = object.keys().find(|key| !keys.contains(&key.as_str())) {
        return Err(ValidationError::new(
            format!("{path}.{unknown}"),
            "unknown attribute",
        ));
    }
    if let Some(missing) = keys.iter().find(|key| !object.contains_key(**key)) {
        return Err(ValidationError::new(
            format!("{path}.{missing}"),
            "is required",
        ));
    }
    Ok(())
}

fn check_type(
    object: &Map<String, Value>,
    path: &str,
    allowed: &str,
) -> Result<(), ValidationError> {
    match object.get("type").and_then(Value::as_str) {
        Some(kind) if kind == allowed => Ok(()),
        _ => Err(ValidationError::new(
            format!("{path}.type"),
            format!("must be \"{allowed}\""),
        )),
    }
}

fn number(object: &Map<String, Value>, path: &str, key: &str) -> Result<f64, ValidationError> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ValidationError::new(format!("{path}.{key}"), "must be a number"))
}

fn check_coordinates(object: &Map<String, Value>, path: &str) -> Result<(), ValidationError> {
    let lat = number(object, path, "lat")?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::new(
            format!("{path}.lat"),
            "must be between -90 and 90",
        ));
    }
    let lng = number(object, path, "lng")?;
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ValidationError::new(
            format!("{path}.lng"),
            "must be between -180 and 180",
        ));
    }
    Ok(())
}
