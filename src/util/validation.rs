use crate::core::base32::char_to_index;
use crate::core::constants::{LATITUDE_RANGE, LONGITUDE_RANGE, MAX_PRECISION};

/// True when `value` is a 1-12 character geohash (either case).
pub fn is_valid_geohash(value: &str) -> bool {
    let len = value.chars().count();
    (1..=MAX_PRECISION).contains(&len) && value.chars().all(|c| char_to_index(c).is_some())
}

pub fn is_valid_latitude(value: f64) -> bool {
    (LATITUDE_RANGE[0]..=LATITUDE_RANGE[1]).contains(&value)
}

pub fn is_valid_longitude(value: f64) -> bool {
    (LONGITUDE_RANGE[0]..=LONGITUDE_RANGE[1]).contains(&value)
}
