//! Validation and normalization of location and time filters.
pub mod error;
pub mod options;
mod parsing;
pub mod structs;
mod validation;
pub use error::FilterError;
pub use options::{DistanceUnit, PickOptions, normalize_pick_options};
pub use structs::{FilterDescriptor, LocationFilter, TimeRangeFilter};
pub use validation::{
    is_valid_lat_lng, validate_filter_config, validate_location_filter,
    validate_time_range_filter,
};
