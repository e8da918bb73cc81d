//! # EXIF Gallery
//!
//! Open a native photo picker constrained by where and when photos were taken.
//!
//! This crate sits between an application and the native gallery layer. It takes
//! untrusted, loosely-typed filter input, validates and normalizes it into a
//! descriptor the native matcher can trust, and makes sure only one picker is open
//! at a time.
//!
//! ## Key Features
//!
//! - **Encoded Polylines**: Decodes Google Encoded Polyline strings (precision 5 by default).
//! - **Location Filters**: A corridor along a path, or a set of points, each with a radius in meters.
//! - **Time Filters**: A capture time window, given as epoch milliseconds or RFC 3339 strings.
//! - **Bounded Input**: Size limits on polylines, point counts and radii, checked before any expensive work.
//! - **Single-Flight Picker**: An atomic guard that rejects overlapping picks and always releases.
//!
//! ## Usage
//!
//! ```rust
//! use exif_gallery::filter::{LocationFilter, validate_filter_config};
//! use serde_json::json;
//!
//! let descriptor = validate_filter_config(&json!({
//!     "location": { "polyline": "_p~iF~ps|U_ulLnnqC", "radius": 1000 },
//!     "timeRange": { "start": "2024-06-01T00:00:00Z", "end": "2024-06-30T00:00:00Z" }
//! }))
//! .expect("filter is valid");
//!
//! assert!(matches!(descriptor.location, Some(LocationFilter::Path { .. })));
//! assert!(descriptor.time_range.is_some());
//! ```
//!
//! To open the picker, implement [`bridge::NativeBridge`] for the platform layer and
//! drive it through [`ExifGallery`].

pub mod bridge;
mod error;
pub mod filter;
mod gallery;
pub mod polyline;
pub mod session;
pub mod structs;

pub use error::GalleryError;
pub use gallery::{ExifGallery, InitConfig};
pub use structs::Coordinate;
