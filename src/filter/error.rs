use crate::polyline::DecodeError;
use thiserror::Error;

/// A filter or pick option that failed validation.
///
/// Every variant renders a message meant to be shown to whoever built the input;
/// the caller is expected to fix it and retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("filter must have at least one of location or timeRange")]
    MissingCriteria,

    #[error("{field} must be an object, received {received}")]
    NotAnObject {
        field: &'static str,
        received: &'static str,
    },

    // --- Location ---
    #[error("location filter must have either polyline or coordinates")]
    MissingLocationSource,

    #[error("location filter cannot have both polyline and coordinates")]
    ConflictingLocationSource,

    #[error("encoded polyline string cannot be empty")]
    EmptyPolyline,

    #[error(
        "encoded polyline string is {len} bytes and exceeds the 50KB limit. Use a simplified polyline or reduce precision."
    )]
    PolylineTooLarge { len: usize },

    #[error(
        "invalid encoded polyline: {source}. Expected Google Encoded Polyline format (e.g., \"_p~iF~ps|U_ulLnnqC\"). See: https://developers.google.com/maps/documentation/utilities/polylinealgorithm"
    )]
    InvalidPolyline {
        #[source]
        source: DecodeError,
    },

    #[error(
        "polyline must be a string (encoded polyline) or array of LatLng coordinates. Received: {received}"
    )]
    PolylineType { received: &'static str },

    #[error("decoded polyline is empty")]
    EmptyPath,

    #[error("polyline must contain at least 2 coordinates to define a path")]
    PathTooShort,

    #[error(
        "polyline contains {count} points, maximum is {max}. Use a simplified polyline or reduce precision.",
        max = super::structs::MAX_POINTS
    )]
    TooManyPathPoints { count: usize },

    #[error(
        "coordinates must not exceed {max} points, received {count}",
        max = super::structs::MAX_POINTS
    )]
    TooManyCoordinates { count: usize },

    #[error("coordinates must be an array, received {received}")]
    CoordinatesType { received: &'static str },

    #[error("coordinates must contain at least one coordinate")]
    EmptyCoordinates,

    #[error("{field}[{index}] is not a valid LatLng coordinate")]
    InvalidCoordinate { field: &'static str, index: usize },

    #[error("radius must be a finite number")]
    RadiusNotFinite,

    #[error("radius must be greater than 0")]
    RadiusNotPositive,

    #[error("radius must not exceed 50,000 meters (50km)")]
    RadiusTooLarge,

    // --- Time range ---
    #[error("timeRange.{field} must be a timestamp (epoch milliseconds or RFC 3339 string)")]
    TimestampType { field: &'static str },

    #[error("timeRange.{field} is an invalid date")]
    InvalidTimestamp { field: &'static str },

    #[error("timeRange.start must be before timeRange.end")]
    InvertedTimeRange,

    // --- Pick options ---
    #[error("fallbackThreshold must be a finite number")]
    FallbackThresholdNotFinite,

    #[error("fallbackThreshold must be greater than or equal to 0")]
    FallbackThresholdNegative,

    #[error("fallbackThreshold must not exceed 10,000")]
    FallbackThresholdTooLarge,

    #[error("allowManualAdjustment must be a boolean")]
    AllowManualAdjustmentType,

    #[error("distanceUnit must be one of: kilometers, miles")]
    InvalidDistanceUnit,

    #[error("distanceStep must be a finite number")]
    DistanceStepNotFinite,

    #[error("distanceStep must be at least 1 km")]
    DistanceStepTooSmall,

    #[error("distanceStep must not exceed 25 km")]
    DistanceStepTooLarge,
}

impl From<DecodeError> for FilterError {
    fn from(source: DecodeError) -> Self {
        Self::InvalidPolyline { source }
    }
}
