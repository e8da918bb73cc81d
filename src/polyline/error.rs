use thiserror::Error;

/// Failures while decoding an encoded polyline.
///
/// Offsets are byte offsets into the text handed to the decoder, before trimming.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("encoded polyline is empty")]
    EmptyPolyline,

    #[error("malformed polyline at byte {offset}: {reason}")]
    MalformedPolyline { offset: usize, reason: &'static str },

    #[error("unsupported polyline precision {0}, expected 0 to {max}", max = super::codec::MAX_PRECISION)]
    UnsupportedPrecision(u32),
}
