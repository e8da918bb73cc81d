//! Defaults and bounds for the picker options that accompany a filter.

use super::error::FilterError;
use super::parsing::{json_type_name, present};
use super::structs::FilterDescriptor;
use super::validation::validate_filter_config;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_FALLBACK_THRESHOLD: f64 = 5.0;
pub const MAX_FALLBACK_THRESHOLD: f64 = 10_000.0;
pub const DEFAULT_ALLOW_MANUAL_ADJUSTMENT: bool = true;
pub const DEFAULT_DISTANCE_STEP: f64 = 5.0;
pub const MIN_DISTANCE_STEP: f64 = 1.0;
pub const MAX_DISTANCE_STEP: f64 = 25.0;

/// Unit used by the picker's distance slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "kilometers" => Some(Self::Kilometers),
            "miles" => Some(Self::Miles),
            _ => None,
        }
    }
}

/// Fully defaulted and validated picker options, as sent to the native layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDescriptor>,
    /// Below this many filtered matches the native picker falls back to showing
    /// unfiltered images.
    pub fallback_threshold: f64,
    pub allow_manual_adjustment: bool,
    pub has_active_filters: bool,
    pub distance_unit: DistanceUnit,
    pub distance_step: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            filter: None,
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            allow_manual_adjustment: DEFAULT_ALLOW_MANUAL_ADJUSTMENT,
            has_active_filters: false,
            distance_unit: DistanceUnit::default(),
            distance_step: DEFAULT_DISTANCE_STEP,
        }
    }
}

/// Validates raw pick options and fills in defaults.
///
/// `raw` may be `null` (all defaults) or an object. The filter, when present, is
/// validated first; the remaining options are checked afterwards in declaration order.
///
/// # Errors
///
/// Any [`FilterError`] from the filter, or the first out-of-range option.
pub fn normalize_pick_options(raw: &Value) -> Result<PickOptions, FilterError> {
    let object = match raw {
        Value::Null => return Ok(PickOptions::default()),
        Value::Object(object) => object,
        other => {
            return Err(FilterError::NotAnObject {
                field: "options",
                received: json_type_name(other),
            });
        }
    };

    let filter = present(object, "filter")
        .map(validate_filter_config)
        .transpose()?;

    let fallback_threshold = match present(object, "fallbackThreshold") {
        None => DEFAULT_FALLBACK_THRESHOLD,
        Some(value) => {
            let threshold = finite(value).ok_or(FilterError::FallbackThresholdNotFinite)?;
            if threshold < 0.0 {
                return Err(FilterError::FallbackThresholdNegative);
            }
            if threshold > MAX_FALLBACK_THRESHOLD {
                return Err(FilterError::FallbackThresholdTooLarge);
            }
            threshold
        }
    };

    let allow_manual_adjustment = match present(object, "allowManualAdjustment") {
        None => DEFAULT_ALLOW_MANUAL_ADJUSTMENT,
        Some(value) => value
            .as_bool()
            .ok_or(FilterError::AllowManualAdjustmentType)?,
    };

    let distance_unit = match present(object, "distanceUnit") {
        None => DistanceUnit::default(),
        Some(value) => value
            .as_str()
            .and_then(DistanceUnit::from_name)
            .ok_or(FilterError::InvalidDistanceUnit)?,
    };

    let distance_step = match present(object, "distanceStep") {
        None => DEFAULT_DISTANCE_STEP,
        Some(value) => {
            let step = finite(value).ok_or(FilterError::DistanceStepNotFinite)?;
            if step < MIN_DISTANCE_STEP {
                return Err(FilterError::DistanceStepTooSmall);
            }
            if step > MAX_DISTANCE_STEP {
                return Err(FilterError::DistanceStepTooLarge);
            }
            step
        }
    };

    let has_active_filters = filter.as_ref().is_some_and(FilterDescriptor::is_active);
    Ok(PickOptions {
        filter,
        fallback_threshold,
        allow_manual_adjustment,
        has_active_filters,
        distance_unit,
        distance_step,
    })
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
