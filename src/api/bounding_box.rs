use crate::core::codec::{decode_intervals, encode};
use crate::core::constants::{BITS_PER_CHAR, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::util::error::GeohashError;
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The geographic extent of a geohash cell, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Western edge
    pub min_lon: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Point-in-box test, inclusive on every edge.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }

    /// Boxes that only touch along an edge or at a corner still intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max_lat < other.min_lat
            || self.min_lat > other.max_lat
            || self.max_lon < other.min_lon
            || self.min_lon > other.max_lon)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Converts to a `geo_types::Rect` with x = longitude, y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().y, rect.min().x, rect.max().y, rect.max().x)
    }
}

/// Returns the bounding box of a geohash cell, straight from its decode
/// intervals.
///
/// # Example
///
/// ```
/// use geohash_rs::get_bounding_box;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let bbox = get_bounding_box("u4pruy")?;
/// assert!(bbox.contains(57.649, 10.407));
/// # Ok(())
/// # }
/// ```
pub fn get_bounding_box(geohash: &str) -> Result<BoundingBox, GeohashError> {
    let (lat, lon) = decode_intervals(geohash)?;
    Ok(BoundingBox::new(lat.low, lon.low, lat.high, lon.high))
}

/// Alias of [`get_bounding_box`] named after the decode family.
pub fn decode_bounds(geohash: &str) -> Result<BoundingBox, GeohashError> {
    get_bounding_box(geohash)
}

pub fn is_point_in_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    bbox.contains(lat, lon)
}

pub fn is_point_in_geohash(lat: f64, lon: f64, geohash: &str) -> Result<bool, GeohashError> {
    Ok(get_bounding_box(geohash)?.contains(lat, lon))
}

pub fn do_boxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.intersects(b)
}

/// `start`, then every `step` below `stop`, then `stop` itself.
fn axis_samples(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let mut samples: Vec<f64> = std::iter::successors(Some(start), |&v| Some(v + step))
        .take_while(|&v| v < stop)
        .collect();
    samples.push(stop);
    samples
}

/// Finds the geohashes of `precision` characters that intersect `bbox`.
///
/// The box is first clamped to the world. Each axis is then sampled at one
/// cell size from the low edge, always including the high edge, so no cell
/// the box reaches into can fall between samples. The result is sorted and
/// free of duplicates.
///
/// # Example
///
/// ```
/// use geohash_rs::{BoundingBox, geohashes_in_box};
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// let bbox = BoundingBox::new(57.64, 10.40, 57.65, 10.41);
/// assert_eq!(geohashes_in_box(&bbox, 5)?, vec!["u4pru"]);
/// # Ok(())
/// # }
/// ```
pub fn geohashes_in_box(bbox: &BoundingBox, precision: usize) -> Result<Vec<String>, GeohashError> {
    // Check precision up front so an inverted box still reports a bad precision
    encode(bbox.min_lat, bbox.min_lon, precision)?;
    if bbox.min_lat > bbox.max_lat || bbox.min_lon > bbox.max_lon {
        return Ok(Vec::new());
    }

    let [lat_min, lat_max] = LATITUDE_RANGE;
    let [lon_min, lon_max] = LONGITUDE_RANGE;
    let (min_lat, max_lat) = (bbox.min_lat.max(lat_min), bbox.max_lat.min(lat_max));
    let (min_lon, max_lon) = (bbox.min_lon.max(lon_min), bbox.max_lon.min(lon_max));
    if min_lat > max_lat || min_lon > max_lon {
        return Ok(Vec::new());
    }

    let bits = (precision * BITS_PER_CHAR) as i32;
    let lat_step = 180.0 / 2f64.powi(bits / 2);
    let lon_step = 360.0 / 2f64.powi(bits - bits / 2);

    let lats = axis_samples(min_lat, max_lat, lat_step);
    let lons = axis_samples(min_lon, max_lon, lon_step);

    let mut result = BTreeSet::new();
    for &lat in &lats {
        for &lon in &lons {
            result.insert(encode(lat, lon, precision)?);
        }
    }

    log::debug!(
        "{} geohashes of precision {} cover the box",
        result.len(),
        precision
    );
    Ok(result.into_iter().collect())
}
