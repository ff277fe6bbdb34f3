use crate::core::base32::{index_to_char, to_indices};
use crate::core::constants::{BITS_PER_CHAR, LATITUDE_RANGE, LONGITUDE_RANGE, MAX_PRECISION};
use crate::util::error::GeohashError;
use serde::{Deserialize, Serialize};

/// A decoded coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

/// A decoded coordinate pair plus the half-width of the cell on each axis,
/// i.e. the largest possible distance between the centre and the encoded point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExactLatLong {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_error: f64,
    pub longitude_error: f64,
}

impl From<ExactLatLong> for LatLong {
    fn from(exact: ExactLatLong) -> Self {
        Self {
            latitude: exact.latitude,
            longitude: exact.longitude,
        }
    }
}

/// A closed `[low, high]` range narrowed one bit at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub const LATITUDE: Interval = Interval {
        low: LATITUDE_RANGE[0],
        high: LATITUDE_RANGE[1],
    };
    pub const LONGITUDE: Interval = Interval {
        low: LONGITUDE_RANGE[0],
        high: LONGITUDE_RANGE[1],
    };

    fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Halves the interval around `value`; ties go to the upper half.
    fn bisect(&mut self, value: f64) -> bool {
        let mid = self.mid();
        let upper = value >= mid;
        self.narrow(upper);
        upper
    }

    fn narrow(&mut self, upper: bool) {
        let mid = self.mid();
        if upper {
            self.low = mid;
        } else {
            self.high = mid;
        }
    }

    pub fn center(&self) -> f64 {
        self.mid()
    }

    pub fn half_width(&self) -> f64 {
        (self.high - self.low) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    fn flip(self) -> Self {
        match self {
            Axis::Longitude => Axis::Latitude,
            Axis::Latitude => Axis::Longitude,
        }
    }
}

/// Interval-halving state shared by encode and decode.
#[derive(Debug, Clone, Copy)]
struct BitState {
    lat: Interval,
    lon: Interval,
    axis: Axis,
}

impl BitState {
    fn new() -> Self {
        Self {
            lat: Interval::LATITUDE,
            lon: Interval::LONGITUDE,
            axis: Axis::Longitude,
        }
    }

    fn active(&mut self) -> &mut Interval {
        match self.axis {
            Axis::Longitude => &mut self.lon,
            Axis::Latitude => &mut self.lat,
        }
    }

    fn encode_bit(&mut self, latitude: f64, longitude: f64) -> bool {
        let value = match self.axis {
            Axis::Longitude => longitude,
            Axis::Latitude => latitude,
        };
        let bit = self.active().bisect(value);
        self.axis = self.axis.flip();
        bit
    }

    fn decode_bit(&mut self, bit: bool) {
        self.active().narrow(bit);
        self.axis = self.axis.flip();
    }
}

pub(crate) fn check_precision(precision: usize) -> Result<(), GeohashError> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(GeohashError::InvalidLength(precision));
    }
    Ok(())
}

/// Wraps a longitude into [-180, 180] by whole turns, leaving in-range values
/// (including both boundaries) untouched.
fn wrap_longitude(longitude: f64) -> f64 {
    let [min, max] = LONGITUDE_RANGE;
    if longitude > max {
        longitude - 360.0 * ((longitude - max) / 360.0).ceil()
    } else if longitude < min {
        longitude + 360.0 * ((min - longitude) / 360.0).ceil()
    } else {
        longitude
    }
}

fn encode_unchecked(latitude: f64, longitude: f64, precision: usize) -> String {
    let mut state = BitState::new();
    let mut geohash = String::with_capacity(precision);

    for _ in 0..precision {
        let mut value = 0u8;
        for _ in 0..BITS_PER_CHAR {
            value = (value << 1) | u8::from(state.encode_bit(latitude, longitude));
        }
        geohash.push(index_to_char(value));
    }

    geohash
}

/// Encodes a position into a geohash of `precision` characters.
///
/// Out-of-range input is normalised rather than rejected: latitude is clamped
/// to [-90, 90] and longitude is wrapped into [-180, 180]. Use
/// [`encode_strictly`] to reject it instead.
///
/// # Example
///
/// ```
/// use geohash_rs::encode;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// assert_eq!(encode(42.6, -5.6, 12)?, "ezs42e44yx96");
/// assert_eq!(encode(42.6, -5.6, 5)?, "ezs42");
/// # Ok(())
/// # }
/// ```
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> Result<String, GeohashError> {
    check_precision(precision)?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(GeohashError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }

    let [lat_min, lat_max] = LATITUDE_RANGE;
    let lat = latitude.clamp(lat_min, lat_max);
    let lon = wrap_longitude(longitude);
    if lat != latitude || lon != longitude {
        log::trace!("normalised ({latitude}, {longitude}) to ({lat}, {lon})");
    }

    Ok(encode_unchecked(lat, lon, precision))
}

/// Encodes a position, failing with [`GeohashError::InvalidCoordinate`] when
/// latitude is outside [-90, 90] or longitude is outside [-180, 180].
pub fn encode_strictly(
    latitude: f64,
    longitude: f64,
    precision: usize,
) -> Result<String, GeohashError> {
    check_precision(precision)?;

    let [lat_min, lat_max] = LATITUDE_RANGE;
    let [lon_min, lon_max] = LONGITUDE_RANGE;
    if !(lat_min..=lat_max).contains(&latitude) || !(lon_min..=lon_max).contains(&longitude) {
        return Err(GeohashError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }

    Ok(encode_unchecked(latitude, longitude, precision))
}

/// Replays a geohash into its final `(lat, lon)` intervals.
pub(crate) fn decode_intervals(geohash: &str) -> Result<(Interval, Interval), GeohashError> {
    let indices = to_indices(geohash)?;
    let mut state = BitState::new();

    for value in indices {
        for shift in (0..BITS_PER_CHAR).rev() {
            state.decode_bit((value >> shift) & 1 == 1);
        }
    }

    Ok((state.lat, state.lon))
}

/// Decodes a geohash to the centre of its cell together with the error margin
/// on each axis.
///
/// # Example
///
/// ```
/// use geohash_rs::decode_exactly;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let exact = decode_exactly("ezs42")?;
/// assert!((exact.latitude - 42.6).abs() <= exact.latitude_error);
/// assert!((exact.longitude + 5.6).abs() <= exact.longitude_error);
/// # Ok(())
/// # }
/// ```
pub fn decode_exactly(geohash: &str) -> Result<ExactLatLong, GeohashError> {
    let (lat, lon) = decode_intervals(geohash)?;

    Ok(ExactLatLong {
        latitude: lat.center(),
        longitude: lon.center(),
        latitude_error: lat.half_width(),
        longitude_error: lon.half_width(),
    })
}

/// Decodes a geohash to the centre of its cell.
pub fn decode(geohash: &str) -> Result<LatLong, GeohashError> {
    decode_exactly(geohash).map(LatLong::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() -> Result<(), GeohashError> {
        assert_eq!(encode(42.6, -5.6, 12)?, "ezs42e44yx96");
        assert_eq!(encode(42.6, -5.6, 5)?, "ezs42");
        assert_eq!(encode(42.6, -5.6, 1)?, "e");
        assert_eq!(encode(0.0, -5.6, 5)?, "ebh00");
        assert_eq!(encode(57.64911, 10.40744, 11)?, "u4pruydqqvj");
        Ok(())
    }

    #[test]
    fn test_encode_invalid_precision() {
        assert_eq!(encode(42.6, -5.6, 0), Err(GeohashError::InvalidLength(0)));
        assert_eq!(
            encode(42.6, -5.6, 13),
            Err(GeohashError::InvalidLength(13))
        );
        assert_eq!(
            encode_strictly(42.6, -5.6, 13),
            Err(GeohashError::InvalidLength(13))
        );
    }

    #[test]
    fn test_encode_ties_go_up() -> Result<(), GeohashError> {
        // 0.0 sits on the first midpoint of both axes
        assert_eq!(encode(0.0, 0.0, 1)?, "s");
        assert_eq!(encode(90.0, 180.0, 3)?, "zzz");
        assert_eq!(encode(-90.0, -180.0, 3)?, "000");
        Ok(())
    }

    #[test]
    fn test_encode_clamps_latitude() -> Result<(), GeohashError> {
        assert_eq!(encode(95.0, 10.0, 8)?, encode(90.0, 10.0, 8)?);
        assert_eq!(encode(-1000.0, 10.0, 8)?, encode(-90.0, 10.0, 8)?);
        Ok(())
    }

    #[test]
    fn test_encode_wraps_longitude() -> Result<(), GeohashError> {
        assert_eq!(encode(10.0, 190.0, 8)?, encode(10.0, -170.0, 8)?);
        assert_eq!(encode(10.0, -190.0, 8)?, encode(10.0, 170.0, 8)?);
        assert_eq!(encode(10.0, 540.0, 8)?, encode(10.0, 180.0, 8)?);
        assert_eq!(encode(10.0, -540.0, 8)?, encode(10.0, -180.0, 8)?);
        assert_eq!(encode(10.0, 725.5, 8)?, encode(10.0, 5.5, 8)?);
        Ok(())
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert!(matches!(
            encode(f64::NAN, 0.0, 5),
            Err(GeohashError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            encode(0.0, f64::INFINITY, 5),
            Err(GeohashError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_encode_strictly() -> Result<(), GeohashError> {
        assert_eq!(encode_strictly(0.0, -5.6, 5)?, "ebh00");
        assert_eq!(encode_strictly(42.6, -5.6, 12)?, "ezs42e44yx96");
        assert_eq!(encode_strictly(90.0, 180.0, 4)?, encode(90.0, 180.0, 4)?);
        Ok(())
    }

    #[test]
    fn test_encode_strictly_rejects_out_of_range() {
        assert_eq!(
            encode_strictly(91.0, 0.0, 12),
            Err(GeohashError::InvalidCoordinate {
                latitude: 91.0,
                longitude: 0.0
            })
        );
        assert!(matches!(
            encode_strictly(0.0, -180.5, 12),
            Err(GeohashError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            encode_strictly(f64::NAN, 0.0, 12),
            Err(GeohashError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_decode() -> Result<(), GeohashError> {
        let decoded = decode("ezs42")?;
        assert!((decoded.latitude - 42.6).abs() < 0.1);
        assert!((decoded.longitude - (-5.6)).abs() < 0.1);
        Ok(())
    }

    #[test]
    fn test_decode_exactly_errors() -> Result<(), GeohashError> {
        let exact = decode_exactly("ezs42")?;
        // 25 bits: 13 longitude, 12 latitude
        assert_eq!(exact.longitude_error, 180.0 / 8192.0);
        assert_eq!(exact.latitude_error, 90.0 / 4096.0);
        assert!((exact.latitude - 42.6).abs() <= exact.latitude_error);
        assert!((exact.longitude - (-5.6)).abs() <= exact.longitude_error);
        Ok(())
    }

    #[test]
    fn test_decode_single_character() -> Result<(), GeohashError> {
        let exact = decode_exactly("s")?;
        assert_eq!(exact.latitude, 22.5);
        assert_eq!(exact.longitude, 22.5);
        assert_eq!(exact.latitude_error, 22.5);
        assert_eq!(exact.longitude_error, 22.5);
        Ok(())
    }

    #[test]
    fn test_decode_is_case_insensitive() -> Result<(), GeohashError> {
        assert_eq!(decode_exactly("EZS42")?, decode_exactly("ezs42")?);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert_eq!(decode(""), Err(GeohashError::InvalidLength(0)));
        assert!(matches!(
            decode("!invalid"),
            Err(GeohashError::InvalidCharacter { character: '!', .. })
        ));
        assert!(matches!(
            decode_exactly("ezs42a"),
            Err(GeohashError::InvalidCharacter {
                character: 'a',
                position: 5
            })
        ));
        assert_eq!(
            decode("ezs42e44yx96e"),
            Err(GeohashError::InvalidLength(13))
        );
    }

    #[test]
    fn test_decode_intervals_match_error() -> Result<(), GeohashError> {
        let (lat, lon) = decode_intervals("u4pruy")?;
        let exact = decode_exactly("u4pruy")?;
        assert_eq!(lat.low, exact.latitude - exact.latitude_error);
        assert_eq!(lat.high, exact.latitude + exact.latitude_error);
        assert_eq!(lon.low, exact.longitude - exact.longitude_error);
        assert_eq!(lon.high, exact.longitude + exact.longitude_error);
        Ok(())
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(181.0), -179.0);
        assert_eq!(wrap_longitude(-181.0), 179.0);
        assert_eq!(wrap_longitude(540.0), 180.0);
        assert_eq!(wrap_longitude(-540.0), -180.0);
    }
}
