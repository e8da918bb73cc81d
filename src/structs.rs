use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
///
/// Decoded polylines can produce out-of-range values, so construction does not
/// validate. Use [`Coordinate::is_valid`] before handing one to the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when neither component is NaN and both are within
    /// `-90..=90` (latitude) and `-180..=180` (longitude).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}
