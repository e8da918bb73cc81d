//! Conversion of loosely-typed JSON input into coordinates and timestamps.

use crate::structs::Coordinate;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Outcome of reading a timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampValue {
    Valid(DateTime<Utc>),
    /// Right JSON type, but not a representable instant.
    Invalid,
    /// Neither a number nor a string.
    WrongType,
}

/// JSON type name used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Looks up an optional field, treating JSON `null` as absent.
pub fn present<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

/// Reads `{ "lat": number, "lng": number }`. Extra keys are ignored.
///
/// Returns `None` when the value is not an object or either component is missing
/// or not a number. Range is not checked here.
pub fn parse_coordinate(value: &Value) -> Option<Coordinate> {
    let lat = value.get("lat").and_then(Value::as_f64)?;
    let lng = value.get("lng").and_then(Value::as_f64)?;
    Some(Coordinate::new(lat, lng))
}

/// Parses a timestamp given either as epoch milliseconds or as an RFC 3339 string.
///
/// Fractional milliseconds are truncated toward zero.
pub fn parse_timestamp(value: &Value) -> TimestampValue {
    match value {
        Value::Number(number) => {
            let millis = match (number.as_i64(), number.as_f64()) {
                (Some(ms), _) => Some(ms),
                (None, Some(ms)) if ms.is_finite() && ms.abs() < i64::MAX as f64 => {
                    Some(ms.trunc() as i64)
                }
                _ => None,
            };
            millis
                .and_then(DateTime::from_timestamp_millis)
                .map_or(TimestampValue::Invalid, TimestampValue::Valid)
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| TimestampValue::Valid(dt.with_timezone(&Utc)))
            .unwrap_or(TimestampValue::Invalid),
        _ => TimestampValue::WrongType,
    }
}
