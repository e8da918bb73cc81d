//! Contract with the native gallery layer.
//!
//! The native side owns the gallery UI, EXIF extraction and the actual geofence and
//! time matching. This crate only hands it validated options and relays its result.

use crate::filter::PickOptions;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// An opaque failure reported by the native layer. Surfaced as-is, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NativeError {
    pub message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for NativeError {
    fn default() -> Self {
        Self::new("Native platform operation failed")
    }
}

/// Options forwarded to [`NativeBridge::initialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeInitOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub request_permissions_upfront: bool,
}

/// Which criterion put an image into the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilteredBy {
    Location,
    Time,
}

/// EXIF fields the native layer read from an image, when available.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ImageExif {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif: Option<ImageExif>,
    pub filtered_by: FilteredBy,
}

/// What the user picked. A dismissed picker yields `cancelled: true` and no images.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PickResult {
    pub images: Vec<ImageResult>,
    pub cancelled: bool,
}

impl PickResult {
    pub fn cancelled() -> Self {
        Self {
            images: Vec::new(),
            cancelled: true,
        }
    }
}

/// The native gallery implementation.
///
/// Both calls may suspend; they are the only suspension points in a pick.
#[async_trait]
pub trait NativeBridge: Send + Sync {
    async fn initialize(&self, options: NativeInitOptions) -> Result<(), NativeError>;

    /// Opens the picker with fully validated options.
    async fn pick(&self, options: PickOptions) -> Result<PickResult, NativeError>;
}

#[async_trait]
impl<T: NativeBridge + ?Sized> NativeBridge for Arc<T> {
    async fn initialize(&self, options: NativeInitOptions) -> Result<(), NativeError> {
        (**self).initialize(options).await
    }

    async fn pick(&self, options: PickOptions) -> Result<PickResult, NativeError> {
        (**self).pick(options).await
    }
}
