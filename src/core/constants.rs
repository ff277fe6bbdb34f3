/// The geohash base32 alphabet (differs from RFC 4648: no `a`, `i`, `l`, `o`)
pub const BASE32_ALPHABET: &str = "0123456789bcdefghjkmnpqrstuvwxyz";

/// Bits carried by one base32 character
pub const BITS_PER_CHAR: usize = 5;

/// Maximum geohash length, beyond this f64 adds no resolution
pub const MAX_PRECISION: usize = 12;

/// Precision used when none is given
pub const DEFAULT_PRECISION: usize = 12;

/// Latitude range [min, max] in degrees
pub const LATITUDE_RANGE: [f64; 2] = [-90.0, 90.0];

/// Longitude range [min, max] in degrees
pub const LONGITUDE_RANGE: [f64; 2] = [-180.0, 180.0];

/// Mean Earth radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Approximate distance in meters between two geohashes sharing
/// `index` leading characters (0-10)
pub const PREFIX_DISTANCES: [f64; 11] = [
    20_000_000.0,
    5_003_530.0,
    625_441.0,
    123_264.0,
    19_545.0,
    3_803.0,
    610.0,
    118.0,
    19.0,
    3.71,
    0.6,
];
