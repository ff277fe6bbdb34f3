//! Aggregates over collections of geohashes.
//!
//! Every function decodes its inputs to cell centres first; results that are
//! positions are re-encoded at [`DEFAULT_PRECISION`].

use crate::api::distance::geohash_haversine_distance;
use crate::core::codec::{LatLong, decode, encode};
use crate::core::constants::DEFAULT_PRECISION;
use crate::util::error::GeohashError;

fn decode_all<S: AsRef<str>>(geohashes: &[S]) -> Result<Vec<LatLong>, GeohashError> {
    if geohashes.is_empty() {
        return Err(GeohashError::EmptyInput);
    }
    geohashes.iter().map(|g| decode(g.as_ref())).collect()
}

fn extreme<S, F>(geohashes: &[S], key: F, largest: bool) -> Result<String, GeohashError>
where
    S: AsRef<str>,
    F: Fn(&LatLong) -> f64,
{
    let coordinates = decode_all(geohashes)?;
    let mut iter = coordinates.into_iter();
    let mut best = iter.next().ok_or(GeohashError::EmptyInput)?;
    for candidate in iter {
        // first occurrence wins ties
        let better = if largest {
            key(&candidate) > key(&best)
        } else {
            key(&candidate) < key(&best)
        };
        if better {
            best = candidate;
        }
    }
    encode(best.latitude, best.longitude, DEFAULT_PRECISION)
}

/// The geohash of the arithmetic mean of the decoded positions.
///
/// # Example
///
/// ```
/// use geohash_rs::{encode, stats};
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let hashes = vec![
///     encode(50.0, 0.0, 12)?,
///     encode(-50.0, 0.0, 12)?,
///     encode(0.0, -50.0, 12)?,
///     encode(0.0, 50.0, 12)?,
/// ];
/// assert_eq!(stats::mean(&hashes)?, "s00000000000");
/// # Ok(())
/// # }
/// ```
pub fn mean<S: AsRef<str>>(geohashes: &[S]) -> Result<String, GeohashError> {
    let coordinates = decode_all(geohashes)?;
    let n = coordinates.len() as f64;
    let lat = coordinates.iter().map(|c| c.latitude).sum::<f64>() / n;
    let lon = coordinates.iter().map(|c| c.longitude).sum::<f64>() / n;
    encode(lat, lon, DEFAULT_PRECISION)
}

pub fn northern<S: AsRef<str>>(geohashes: &[S]) -> Result<String, GeohashError> {
    extreme(geohashes, |c| c.latitude, true)
}

pub fn southern<S: AsRef<str>>(geohashes: &[S]) -> Result<String, GeohashError> {
    extreme(geohashes, |c| c.latitude, false)
}

pub fn eastern<S: AsRef<str>>(geohashes: &[S]) -> Result<String, GeohashError> {
    extreme(geohashes, |c| c.longitude, true)
}

pub fn western<S: AsRef<str>>(geohashes: &[S]) -> Result<String, GeohashError> {
    extreme(geohashes, |c| c.longitude, false)
}

/// Mean squared haversine distance (m²) from each geohash to the mean geohash.
pub fn variance<S: AsRef<str>>(geohashes: &[S]) -> Result<f64, GeohashError> {
    let centre = mean(geohashes)?;
    let mut total = 0.0;
    for geohash in geohashes {
        let d = geohash_haversine_distance(geohash.as_ref(), &centre)?;
        total += d * d;
    }
    Ok(total / geohashes.len() as f64)
}

/// Square root of [`variance`], in meters.
pub fn std<S: AsRef<str>>(geohashes: &[S]) -> Result<f64, GeohashError> {
    variance(geohashes).map(f64::sqrt)
}
