use crate::structs::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest encoded polyline accepted before decoding, in bytes (50 KB).
pub const MAX_POLYLINE_BYTES: usize = 51_200;
/// Most points a path or point set may contain.
pub const MAX_POINTS: usize = 1000;
/// Largest accepted match radius in meters (50 km).
pub const MAX_RADIUS_METERS: f64 = 50_000.0;

/// A validated location filter.
///
/// Serializes to the shape the native layer expects: a path becomes
/// `{"polyline": [...], "radius": r}` (always decoded to coordinates), a point set
/// becomes `{"coordinates": [...], "radius": r}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LocationFilterWire")]
pub enum LocationFilter {
    /// A corridor: matches anything within `radius_meters` of a point on the path.
    /// Holds at least two points.
    Path {
        points: Vec<Coordinate>,
        radius_meters: Option<f64>,
    },
    /// Matches anything within `radius_meters` of any one of the points.
    PointSet {
        points: Vec<Coordinate>,
        radius_meters: Option<f64>,
    },
}

impl LocationFilter {
    pub fn points(&self) -> &[Coordinate] {
        match self {
            Self::Path { points, .. } | Self::PointSet { points, .. } => points,
        }
    }

    /// `None` means the native layer applies its own default radius.
    pub fn radius_meters(&self) -> Option<f64> {
        match self {
            Self::Path { radius_meters, .. } | Self::PointSet { radius_meters, .. } => {
                *radius_meters
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationFilterWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    polyline: Option<Vec<Coordinate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Vec<Coordinate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
}

impl From<LocationFilter> for LocationFilterWire {
    fn from(filter: LocationFilter) -> Self {
        match filter {
            LocationFilter::Path {
                points,
                radius_meters,
            } => Self {
                polyline: Some(points),
                coordinates: None,
                radius: radius_meters,
            },
            LocationFilter::PointSet {
                points,
                radius_meters,
            } => Self {
                polyline: None,
                coordinates: Some(points),
                radius: radius_meters,
            },
        }
    }
}

/// A capture time window. `start` is always strictly before `end`.
///
/// Serialized as epoch milliseconds, which is what the native layer compares
/// against EXIF capture times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeRangeFilter {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end: DateTime<Utc>,
}

/// A normalized filter, safe to hand to the native matching stage.
///
/// Produced by [`validate_filter_config`](super::validate_filter_config); at least one
/// of the two criteria is always present. Criteria combine with AND semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRangeFilter>,
}

impl FilterDescriptor {
    pub fn is_active(&self) -> bool {
        self.location.is_some() || self.time_range.is_some()
    }
}
