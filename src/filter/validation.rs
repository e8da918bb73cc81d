//! Validation of untrusted filter input into a [`FilterDescriptor`].
//!
//! Checks run in a fixed order so the same bad input always yields the same error.
//! Input is never modified; encoded polylines are decoded into the returned descriptor.

use super::error::FilterError;
use super::parsing::{TimestampValue, json_type_name, parse_coordinate, parse_timestamp, present};
use super::structs::{
    FilterDescriptor, LocationFilter, MAX_POINTS, MAX_POLYLINE_BYTES, MAX_RADIUS_METERS,
    TimeRangeFilter,
};
use crate::polyline;
use crate::structs::Coordinate;
use serde_json::{Map, Value};
use tracing::debug;

/// True when `value` is an object with numeric `lat` in `-90..=90` and numeric
/// `lng` in `-180..=180`.
///
/// ```rust
/// use exif_gallery::filter::is_valid_lat_lng;
/// use serde_json::json;
///
/// assert!(is_valid_lat_lng(&json!({"lat": 48.8566, "lng": 2.3522})));
/// assert!(!is_valid_lat_lng(&json!({"lat": 200, "lng": 0})));
/// assert!(!is_valid_lat_lng(&json!({"lat": 0})));
/// ```
pub fn is_valid_lat_lng(value: &Value) -> bool {
    parse_coordinate(value).is_some_and(|c| c.is_valid())
}

/// Validates a complete filter and returns its normalized form.
///
/// A present `location` is validated before a present `timeRange`; the first failure
/// is returned.
///
/// # Errors
///
/// [`FilterError::MissingCriteria`] when neither `location` nor `timeRange` is given,
/// otherwise whatever [`validate_location_filter`] or [`validate_time_range_filter`]
/// reports.
///
/// # Example
///
/// ```rust
/// use exif_gallery::filter::{LocationFilter, validate_filter_config};
/// use serde_json::json;
///
/// let descriptor = validate_filter_config(&json!({
///     "location": { "polyline": "_p~iF~ps|U_ulLnnqC", "radius": 1000 }
/// }))
/// .unwrap();
///
/// let Some(LocationFilter::Path { points, radius_meters }) = descriptor.location else {
///     panic!("expected a path");
/// };
/// assert_eq!(points.len(), 2);
/// assert_eq!(radius_meters, Some(1000.0));
/// ```
pub fn validate_filter_config(raw: &Value) -> Result<FilterDescriptor, FilterError> {
    let object = as_object(raw, "filter")?;
    let location = present(object, "location");
    let time_range = present(object, "timeRange");
    if location.is_none() && time_range.is_none() {
        return Err(FilterError::MissingCriteria);
    }

    let location = location.map(validate_location_filter).transpose()?;
    let time_range = time_range.map(validate_time_range_filter).transpose()?;

    Ok(FilterDescriptor {
        location,
        time_range,
    })
}

/// Validates a location filter: exactly one of `polyline` or `coordinates`, plus an
/// optional `radius` in meters.
///
/// `polyline` may be an encoded string or an array of `{lat, lng}` objects and needs
/// at least two points. `coordinates` must be an array and needs at least one.
/// Both are capped at [`MAX_POINTS`].
pub fn validate_location_filter(raw: &Value) -> Result<LocationFilter, FilterError> {
    let object = as_object(raw, "location")?;
    let polyline = present(object, "polyline");
    let coordinates = present(object, "coordinates");

    let filter = match (polyline, coordinates) {
        (None, None) => return Err(FilterError::MissingLocationSource),
        (Some(_), Some(_)) => return Err(FilterError::ConflictingLocationSource),
        (Some(polyline), None) => LocationFilter::Path {
            points: resolve_path(polyline)?,
            radius_meters: None,
        },
        (None, Some(coordinates)) => LocationFilter::PointSet {
            points: resolve_point_set(coordinates)?,
            radius_meters: None,
        },
    };

    let radius = present(object, "radius").map(validate_radius).transpose()?;
    Ok(match filter {
        LocationFilter::Path { points, .. } => LocationFilter::Path {
            points,
            radius_meters: radius,
        },
        LocationFilter::PointSet { points, .. } => LocationFilter::PointSet {
            points,
            radius_meters: radius,
        },
    })
}

/// Validates `{ start, end }`. Both must be valid timestamps and `start` must be
/// strictly before `end`.
pub fn validate_time_range_filter(raw: &Value) -> Result<TimeRangeFilter, FilterError> {
    let object = as_object(raw, "timeRange")?;
    let start = required_timestamp(object, "start")?;
    let end = required_timestamp(object, "end")?;
    if start >= end {
        return Err(FilterError::InvertedTimeRange);
    }
    Ok(TimeRangeFilter { start, end })
}

fn as_object<'a>(
    value: &'a Value,
    field: &'static str,
) -> Result<&'a Map<String, Value>, FilterError> {
    value.as_object().ok_or(FilterError::NotAnObject {
        field,
        received: json_type_name(value),
    })
}

fn required_timestamp(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<chrono::DateTime<chrono::Utc>, FilterError> {
    match object.get(field).map(parse_timestamp) {
        Some(TimestampValue::Valid(dt)) => Ok(dt),
        Some(TimestampValue::Invalid) => Err(FilterError::InvalidTimestamp { field }),
        Some(TimestampValue::WrongType) | None => Err(FilterError::TimestampType { field }),
    }
}

/// Turns the `polyline` field into a checked list of at least two points.
fn resolve_path(polyline: &Value) -> Result<Vec<Coordinate>, FilterError> {
    let points = match polyline {
        Value::String(encoded) => decode_bounded(encoded)?,
        Value::Array(items) => {
            // Size is checked before element parsing so huge arrays fail cheaply.
            check_path_length(items.len())?;
            parse_points(items, "polyline")?
        }
        other => {
            return Err(FilterError::PolylineType {
                received: json_type_name(other),
            });
        }
    };
    check_path_length(points.len())?;
    check_points(&points, "polyline")?;
    Ok(points)
}

fn decode_bounded(encoded: &str) -> Result<Vec<Coordinate>, FilterError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(FilterError::EmptyPolyline);
    }
    if encoded.len() > MAX_POLYLINE_BYTES {
        return Err(FilterError::PolylineTooLarge { len: encoded.len() });
    }
    // Decoding the untrimmed text keeps error offsets relative to the caller's string.
    let points = polyline::decode(encoded)?;
    debug!(
        bytes = trimmed.len(),
        points = points.len(),
        "decoded encoded polyline"
    );
    Ok(points)
}

fn check_path_length(len: usize) -> Result<(), FilterError> {
    match len {
        0 => Err(FilterError::EmptyPath),
        1 => Err(FilterError::PathTooShort),
        n if n > MAX_POINTS => Err(FilterError::TooManyPathPoints { count: n }),
        _ => Ok(()),
    }
}

fn resolve_point_set(coordinates: &Value) -> Result<Vec<Coordinate>, FilterError> {
    let Value::Array(items) = coordinates else {
        return Err(FilterError::CoordinatesType {
            received: json_type_name(coordinates),
        });
    };
    if items.is_empty() {
        return Err(FilterError::EmptyCoordinates);
    }
    if items.len() > MAX_POINTS {
        return Err(FilterError::TooManyCoordinates { count: items.len() });
    }
    let points = parse_points(items, "coordinates")?;
    check_points(&points, "coordinates")?;
    Ok(points)
}

/// Parses every element, naming the first one that is not a `{lat, lng}` object.
fn parse_points(items: &[Value], field: &'static str) -> Result<Vec<Coordinate>, FilterError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse_coordinate(item).ok_or(FilterError::InvalidCoordinate { field, index })
        })
        .collect()
}

fn check_points(points: &[Coordinate], field: &'static str) -> Result<(), FilterError> {
    match points.iter().position(|p| !p.is_valid()) {
        Some(index) => Err(FilterError::InvalidCoordinate { field, index }),
        None => Ok(()),
    }
}

fn validate_radius(radius: &Value) -> Result<f64, FilterError> {
    let radius = radius
        .as_f64()
        .filter(|r| r.is_finite())
        .ok_or(FilterError::RadiusNotFinite)?;
    if radius <= 0.0 {
        return Err(FilterError::RadiusNotPositive);
    }
    if radius > MAX_RADIUS_METERS {
        return Err(FilterError::RadiusTooLarge);
    }
    Ok(radius)
}
