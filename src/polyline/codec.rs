//! Google Encoded Polyline Algorithm Format.
//!
//! Each point is stored as a pair of signed deltas from the previous point, scaled
//! by `10^precision`, zig-zag encoded and split into 5-bit groups. Every group is
//! offset by 63 so the output stays within printable ASCII (`?` to `~`); a set
//! `0x20` bit marks that another group follows.

use super::error::DecodeError;
use crate::structs::Coordinate;

/// Precision used by Google Maps and most producers.
pub const DEFAULT_PRECISION: u32 = 5;
/// Highest precision accepted. `10^10` degrees is far below any GPS accuracy.
pub const MAX_PRECISION: u32 = 10;

const ALPHABET_OFFSET: u8 = 63;
const MAX_CHAR: u8 = ALPHABET_OFFSET + 0x3f;
const CONTINUATION_BIT: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;
// Twelve groups, 60 bits. Wider values cannot come from a sane encoder.
const MAX_SHIFT: u32 = 55;

/// Decodes a precision-5 encoded polyline.
///
/// Leading and trailing whitespace is ignored. The decoder never returns a partial
/// sequence: any malformed input fails the whole call.
///
/// # Errors
///
/// * [`DecodeError::EmptyPolyline`] if the text is empty after trimming.
/// * [`DecodeError::MalformedPolyline`] if the input ends in the middle of a value,
///   ends after a latitude without its longitude, contains a character outside the
///   polyline alphabet, or encodes a value too wide to represent.
///
/// # Example
///
/// ```rust
/// use exif_gallery::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC").unwrap();
/// assert_eq!(points.len(), 2);
/// assert!((points[0].lat - 38.5).abs() < 1e-9);
/// assert!((points[1].lng - -120.95).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    decode_with_precision(encoded, DEFAULT_PRECISION)
}

/// Decodes an encoded polyline produced with `10^precision` scaling.
///
/// # Errors
///
/// Same as [`decode`], plus [`DecodeError::UnsupportedPrecision`] when `precision`
/// exceeds [`MAX_PRECISION`].
pub fn decode_with_precision(
    encoded: &str,
    precision: u32,
) -> Result<Vec<Coordinate>, DecodeError> {
    let factor = scale_factor(precision)?;
    let leading = encoded.len() - encoded.trim_start().len();
    let bytes = encoded.trim().as_bytes();
    if bytes.is_empty() {
        return Err(DecodeError::EmptyPolyline);
    }

    let mut reader = ValueReader {
        bytes,
        index: 0,
        base_offset: leading,
    };
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    // Shortest possible point is two single-byte values.
    let mut points = Vec::with_capacity(bytes.len() / 2);

    while !reader.is_done() {
        lat = reader.accumulate(lat)?;
        if reader.is_done() {
            return Err(reader.malformed(reader.index, "missing longitude for the final point"));
        }
        lng = reader.accumulate(lng)?;
        points.push(Coordinate::new(lat as f64 / factor, lng as f64 / factor));
    }

    Ok(points)
}

fn scale_factor(precision: u32) -> Result<f64, DecodeError> {
    if precision > MAX_PRECISION {
        return Err(DecodeError::UnsupportedPrecision(precision));
    }
    Ok(10f64.powi(precision as i32))
}

/// Maps a raw zig-zag value back to its signed delta.
fn unzigzag(value: u64) -> i64 {
    if value & 1 == 1 {
        -(((value + 1) >> 1) as i64)
    } else {
        (value >> 1) as i64
    }
}

struct ValueReader<'a> {
    bytes: &'a [u8],
    index: usize,
    base_offset: usize,
}

impl ValueReader<'_> {
    fn is_done(&self) -> bool {
        self.index >= self.bytes.len()
    }

    fn malformed(&self, index: usize, reason: &'static str) -> DecodeError {
        DecodeError::MalformedPolyline {
            offset: self.base_offset + index,
            reason,
        }
    }

    /// Reads one varint and adds its delta to the running accumulator.
    fn accumulate(&mut self, current: i64) -> Result<i64, DecodeError> {
        let start = self.index;
        let delta = self.next_value()?;
        current
            .checked_add(delta)
            .ok_or_else(|| self.malformed(start, "accumulated coordinate overflows"))
    }

    fn next_value(&mut self) -> Result<i64, DecodeError> {
        let start = self.index;
        let mut result: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let Some(&byte) = self.bytes.get(self.index) else {
                return Err(self.malformed(self.index, "input ends in the middle of a value"));
            };
            if !(ALPHABET_OFFSET..=MAX_CHAR).contains(&byte) {
                return Err(self.malformed(self.index, "character outside the polyline alphabet"));
            }
            if shift > MAX_SHIFT {
                return Err(self.malformed(start, "value is wider than 60 bits"));
            }
            let chunk = u64::from(byte - ALPHABET_OFFSET);
            result |= (chunk & CHUNK_MASK) << shift;
            shift += 5;
            self.index += 1;
            if chunk & CONTINUATION_BIT == 0 {
                return Ok(unzigzag(result));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    const GOOGLE_SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    /// Encodes with the `polyline` crate, so the decoder is never checked against itself.
    fn reference_encode(points: &[Coordinate], precision: u32) -> String {
        let coords = points.iter().map(|p| Coord { x: p.lng, y: p.lat });
        ::polyline::encode_coordinates(coords, precision).unwrap()
    }

    fn assert_close(actual: &[Coordinate], expected: &[(f64, f64)], tolerance: f64) {
        assert_eq!(actual.len(), expected.len(), "point count differs");
        for (i, (point, (lat, lng))) in actual.iter().zip(expected).enumerate() {
            assert!(
                (point.lat - lat).abs() < tolerance && (point.lng - lng).abs() < tolerance,
                "point {i} was {point:?}, expected ({lat}, {lng})"
            );
        }
    }

    #[test]
    fn test_decodes_google_reference_polyline() {
        let points = decode(GOOGLE_SAMPLE).unwrap();
        assert_close(
            &points,
            &[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)],
            1e-9,
        );
    }

    #[test]
    fn test_decodes_two_point_prefix() {
        let points = decode("_p~iF~ps|U_ulLnnqC").unwrap();
        assert_close(&points, &[(38.5, -120.2), (40.7, -120.95)], 1e-9);
    }

    #[test]
    fn test_ignores_surrounding_whitespace() {
        let points = decode("  _p~iF~ps|U\n").unwrap();
        assert_close(&points, &[(38.5, -120.2)], 1e-9);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(decode(""), Err(DecodeError::EmptyPolyline));
        assert_eq!(decode(" \t\n"), Err(DecodeError::EmptyPolyline));
    }

    #[test]
    fn test_unterminated_continuation_fails_without_partial_result() {
        // The first point is complete, the second latitude ends with a continuation byte.
        let result = decode("_p~iF~ps|U_ul");
        assert!(matches!(
            result,
            Err(DecodeError::MalformedPolyline { offset: 13, .. })
        ));

        // A lone continuation byte.
        assert!(matches!(
            decode("_"),
            Err(DecodeError::MalformedPolyline { offset: 1, .. })
        ));
    }

    #[test]
    fn test_every_truncation_of_a_valid_polyline_fails() {
        // Prefixes that stop mid-value or between a latitude and its longitude.
        for end in 1..GOOGLE_SAMPLE.len() {
            let prefix = &GOOGLE_SAMPLE[..end];
            let valid_ends = [10, 18];
            if valid_ends.contains(&end) {
                assert!(decode(prefix).is_ok(), "prefix {prefix:?} should decode");
            } else {
                assert!(decode(prefix).is_err(), "prefix {prefix:?} should fail");
            }
        }
    }

    #[test]
    fn test_missing_longitude_is_malformed() {
        // "_p~iF" is a complete latitude with nothing after it.
        let err = decode("_p~iF").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedPolyline {
                offset: 5,
                reason: "missing longitude for the final point"
            }
        );
    }

    #[test]
    fn test_offsets_account_for_leading_whitespace() {
        let err = decode("   _p~iF").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPolyline { offset: 8, .. }));
    }

    #[test]
    fn test_rejects_characters_outside_alphabet() {
        let err = decode("_p~iF ps|U").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPolyline { offset: 5, .. }));

        let err = decode("_p~iF~ps|Ué").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPolyline { offset: 10, .. }));
    }

    #[test]
    fn test_rejects_overlong_values() {
        let overlong = "~".repeat(20);
        let err = decode(&overlong).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPolyline { offset: 0, .. }));
    }

    #[test]
    fn test_decodes_independently_encoded_path() {
        let path = [
            Coordinate::new(52.379_189, 4.899_431),
            Coordinate::new(52.370_216, 4.895_168),
            Coordinate::new(-33.868_82, 151.209_29),
            Coordinate::new(-89.999_99, 179.999_99),
            Coordinate::new(0.0, -0.000_01),
        ];
        let decoded = decode(&reference_encode(&path, 5)).unwrap();
        let expected: Vec<(f64, f64)> = path.iter().map(|p| (p.lat, p.lng)).collect();
        assert_close(&decoded, &expected, 1e-5);
    }

    #[test]
    fn test_decodes_long_independently_encoded_route() {
        let route: Vec<Coordinate> = (0..1000)
            .map(|i| {
                let t = f64::from(i) / 1000.0;
                Coordinate::new(52.0 + t * 0.8 + (t * 40.0).sin() * 0.01, 4.5 - t * 9.3)
            })
            .collect();
        let decoded = decode(&reference_encode(&route, 5)).unwrap();
        let expected: Vec<(f64, f64)> = route.iter().map(|p| (p.lat, p.lng)).collect();
        assert_close(&decoded, &expected, 1e-5);
    }

    #[test]
    fn test_precision_six() {
        let path = [
            Coordinate::new(47.141_039, 8.443_761),
            Coordinate::new(47.141_522, 8.444_087),
        ];
        let encoded = reference_encode(&path, 6);
        let decoded = decode_with_precision(&encoded, 6).unwrap();
        let expected: Vec<(f64, f64)> = path.iter().map(|p| (p.lat, p.lng)).collect();
        assert_close(&decoded, &expected, 1e-6);

        // Reading precision-6 text as precision 5 scales every value by ten.
        let misread = decode(&encoded).unwrap();
        assert!((misread[0].lat - 471.410_39).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_precision() {
        assert_eq!(
            decode_with_precision("_p~iF~ps|U", 11),
            Err(DecodeError::UnsupportedPrecision(11))
        );
    }

    #[test]
    fn test_unzigzag() {
        assert_eq!(unzigzag(0), 0);
        assert_eq!(unzigzag(1), -1);
        assert_eq!(unzigzag(2), 1);
        assert_eq!(unzigzag(3), -2);
        assert_eq!(unzigzag(4), 2);
    }
}
