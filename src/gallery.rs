use crate::bridge::{NativeBridge, NativeInitOptions, PickResult};
use crate::error::GalleryError;
use crate::filter::normalize_pick_options;
use crate::session::PickerSession;
use bon::{Builder, bon};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Settings for [`ExifGallery::initialize`].
///
/// ```rust
/// use exif_gallery::InitConfig;
///
/// let config = InitConfig::builder()
///     .locale("de")
///     .request_permissions_upfront(true)
///     .build();
/// assert_eq!(config.locale.as_deref(), Some("de"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct InitConfig {
    /// Language for the native picker UI. `None` lets the device decide.
    #[builder(into)]
    pub locale: Option<String>,
    /// Ask for photo library access during initialization instead of on first pick.
    #[builder(default)]
    pub request_permissions_upfront: bool,
}

/// Opens the native photo picker with validated EXIF filters.
///
/// Holds the native bridge and the [`PickerSession`] that guarantees at most one
/// picker is open at a time. Create it once and share it.
///
/// ```rust
/// # use exif_gallery::{ExifGallery, GalleryError};
/// # use exif_gallery::bridge::{NativeBridge, NativeError, NativeInitOptions, PickResult};
/// # use exif_gallery::filter::PickOptions;
/// # struct Native;
/// # #[async_trait::async_trait]
/// # impl NativeBridge for Native {
/// #     async fn initialize(&self, _: NativeInitOptions) -> Result<(), NativeError> { Ok(()) }
/// #     async fn pick(&self, _: PickOptions) -> Result<PickResult, NativeError> {
/// #         Ok(PickResult::cancelled())
/// #     }
/// # }
/// # #[tokio::main]
/// # async fn main() -> Result<(), GalleryError> {
/// use serde_json::json;
///
/// let gallery = ExifGallery::builder().bridge(Native).build();
/// gallery.initialize(Default::default()).await?;
///
/// let result = gallery
///     .pick(&json!({
///         "filter": {"location": {"polyline": "_p~iF~ps|U_ulLnnqC", "radius": 1000}},
///         "distanceUnit": "miles"
///     }))
///     .await?;
/// println!("picked {} images", result.images.len());
/// # Ok(())
/// # }
/// ```
pub struct ExifGallery<B> {
    bridge: B,
    session: Arc<PickerSession>,
}

#[bon]
impl<B: NativeBridge> ExifGallery<B> {
    /// Constructs an `ExifGallery` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `bridge: B` - The native gallery implementation.
    /// * `session: Arc<PickerSession>` - (Default: a fresh session) Shared picker state.
    ///   Pass the same session to every gallery that must not open concurrently.
    #[builder]
    pub fn new(bridge: B, #[builder(default)] session: Arc<PickerSession>) -> Self {
        Self { bridge, session }
    }

    pub fn session(&self) -> &PickerSession {
        &self.session
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Initializes the native layer. Must succeed once before [`pick`](Self::pick).
    ///
    /// Session state changes only after the native layer confirms; a failed call
    /// leaves the session exactly as it was.
    ///
    /// # Errors
    ///
    /// [`GalleryError::Native`] when the native layer rejects initialization.
    pub async fn initialize(&self, config: InitConfig) -> Result<(), GalleryError> {
        let request_permissions_upfront = config.request_permissions_upfront;
        info!(
            locale = config.locale.as_deref().unwrap_or("device"),
            request_permissions_upfront, "initializing native gallery"
        );

        self.bridge
            .initialize(NativeInitOptions {
                locale: config.locale,
                request_permissions_upfront,
            })
            .await
            .inspect_err(|e| warn!(error = %e, "native initialization failed"))?;

        self.session
            .set_permissions_requested_upfront(request_permissions_upfront);
        self.session.mark_initialized();
        Ok(())
    }

    /// Validates `raw_options`, then opens the native picker.
    ///
    /// `raw_options` is the loosely-typed options object (or `null` for defaults).
    /// All validation happens before the native layer is called. The in-progress
    /// flag is released on every exit, including when this future is dropped.
    ///
    /// # Errors
    ///
    /// * [`GalleryError::InitializationRequired`] if [`initialize`](Self::initialize)
    ///   has not succeeded yet.
    /// * [`GalleryError::PickerInProgress`] if another pick is still running.
    /// * [`GalleryError::Filter`] if the filter or any option is invalid.
    /// * [`GalleryError::Native`] if the native picker fails.
    pub async fn pick(&self, raw_options: &Value) -> Result<PickResult, GalleryError> {
        if !self.session.is_initialized() {
            warn!("pick rejected: gallery is not initialized");
            return Err(GalleryError::InitializationRequired);
        }
        let Some(_guard) = self.session.acquire() else {
            warn!("pick rejected: another picker is in progress");
            return Err(GalleryError::PickerInProgress);
        };

        let options = normalize_pick_options(raw_options)
            .inspect_err(|e| warn!(error = %e, "pick options rejected"))?;
        info!(
            has_active_filters = options.has_active_filters,
            distance_unit = ?options.distance_unit,
            "opening native picker"
        );

        let result = self
            .bridge
            .pick(options)
            .await
            .inspect_err(|e| warn!(error = %e, "native picker failed"))?;
        info!(
            images = result.images.len(),
            cancelled = result.cancelled,
            "native picker closed"
        );
        Ok(result)
    }
}
