//! Decoding of Google Encoded Polyline strings.
mod codec;
pub mod error;
pub use codec::{DEFAULT_PRECISION, MAX_PRECISION, decode, decode_with_precision};
pub use error::DecodeError;
