use thiserror::Error;

/// The primary error type for the exif-gallery crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    #[error("Plugin must be initialized before calling pick()")]
    InitializationRequired,

    #[error("Cannot open picker while another picker is in progress")]
    PickerInProgress,

    #[error("Invalid filter: {0}")]
    Filter(#[from] crate::filter::FilterError),

    #[error("Native platform error: {0}")]
    Native(#[from] crate::bridge::NativeError),
}

impl GalleryError {
    /// Stable machine-readable code, matching what the native layer reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InitializationRequired => "initialization_required",
            Self::PickerInProgress => "picker_in_progress",
            Self::Filter(_) => "filter_error",
            Self::Native(_) => "native_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NativeError;
    use crate::filter::FilterError;

    #[test]
    fn test_codes() {
        assert_eq!(
            GalleryError::InitializationRequired.code(),
            "initialization_required"
        );
        assert_eq!(GalleryError::PickerInProgress.code(), "picker_in_progress");
        assert_eq!(
            GalleryError::from(FilterError::RadiusTooLarge).code(),
            "filter_error"
        );
        assert_eq!(
            GalleryError::from(NativeError::default()).code(),
            "native_error"
        );
    }

    #[test]
    fn test_filter_message_is_preserved() {
        let err = GalleryError::from(FilterError::MissingCriteria);
        assert_eq!(
            err.to_string(),
            "Invalid filter: filter must have at least one of location or timeRange"
        );
    }
}
