use crate::api::bounding_box::{BoundingBox, get_bounding_box};
use crate::core::adjacency::{Direction, get_adjacent};
use crate::core::codec::{check_precision, decode_exactly, encode};
use crate::core::constants::BITS_PER_CHAR;
use crate::util::coord::Coordinate;
use crate::util::error::GeohashError;
use crate::util::validation::{is_valid_latitude, is_valid_longitude};
use geo_types::{LineString, Point, Polygon, Rect};
use std::collections::HashSet;

/// A single geohash cell.
///
/// Each `GeohashCell` represents one rectangle of the geohash grid, with its
/// geohash, centre point in WGS84 (x = longitude, y = latitude), precision
/// and error margins.
///
/// # Example
///
/// ```
/// use geohash_rs::GeohashCell;
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// // (longitude, latitude)
/// let cell = GeohashCell::from_wgs84(&(-5.6, 42.6), 5)?;
/// assert_eq!(cell.id, "ezs42");
///
/// // Convert the cell to a polygon for GIS operations
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeohashCell {
    /// Lower-case geohash of this cell
    pub id: String,
    /// Centre of the cell, x = longitude, y = latitude
    pub center: Point<f64>,
    /// Number of characters in the geohash (1-12)
    pub precision: usize,
    /// Half-height of the cell in degrees
    pub latitude_error: f64,
    /// Half-width of the cell in degrees
    pub longitude_error: f64,
}

impl GeohashCell {
    /// Create a GeohashCell from a geohash string (either case).
    ///
    /// # Example
    /// ```
    /// use geohash_rs::GeohashCell;
    ///
    /// # fn main() -> Result<(), geohash_rs::GeohashError> {
    /// let cell = GeohashCell::from_wgs84(&(10.40744, 57.64911), 11)?;
    /// let restored = GeohashCell::from_geohash(&cell.id)?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_geohash(geohash: &str) -> Result<Self, GeohashError> {
        let exact = decode_exactly(geohash)?;

        Ok(Self {
            id: geohash.to_ascii_lowercase(),
            center: Point::new(exact.longitude, exact.latitude),
            precision: geohash.len(),
            latitude_error: exact.latitude_error,
            longitude_error: exact.longitude_error,
        })
    }

    /// Create a GeohashCell containing a WGS84 (lon/lat) coordinate.
    ///
    /// Out-of-range coordinates are normalised the way [`encode`] does.
    pub fn from_wgs84(coord: &impl Coordinate, precision: usize) -> Result<Self, GeohashError> {
        let id = encode(coord.latitude(), coord.longitude(), precision)?;
        Self::from_geohash(&id)
    }

    /// Create GeohashCells along a LineString in WGS84 coordinates.
    ///
    /// Samples points along each segment at half a cell and returns every
    /// distinct cell touched, in the order first reached. Vertices must lie
    /// within [-90, 90] latitude and [-180, 180] longitude.
    pub fn from_line_string(line: &LineString, precision: usize) -> Result<Vec<Self>, GeohashError> {
        check_precision(precision)?;
        if let Some(bad) = line
            .0
            .iter()
            .find(|c| !is_valid_latitude(c.y) || !is_valid_longitude(c.x))
        {
            return Err(GeohashError::InvalidCoordinate {
                latitude: bad.y,
                longitude: bad.x,
            });
        }

        let lat_bits = (precision * BITS_PER_CHAR) / 2;
        let lon_bits = precision * BITS_PER_CHAR - lat_bits;
        let cell_size = (180.0 / 2f64.powi(lat_bits as i32)).min(360.0 / 2f64.powi(lon_bits as i32));
        let step_size = cell_size * 0.5;

        let mut seen: HashSet<String> = HashSet::new();
        let mut cells: Vec<GeohashCell> = Vec::new();

        let mut visit = |lon: f64, lat: f64| -> Result<(), GeohashError> {
            let id = encode(lat, lon, precision)?;
            if seen.insert(id.clone()) {
                cells.push(Self::from_geohash(&id)?);
            }
            Ok(())
        };

        if let [only] = line.0.as_slice() {
            visit(only.x, only.y)?;
        }

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                visit(start.x + t * dx, start.y + t * dy)?;
            }
        }

        Ok(cells)
    }

    /// Returns the longitude of the cell centre.
    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    /// Returns the latitude of the cell centre.
    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.latitude() - self.latitude_error,
            self.longitude() - self.longitude_error,
            self.latitude() + self.latitude_error,
            self.longitude() + self.longitude_error,
        )
    }

    pub fn to_rect(&self) -> Rect<f64> {
        self.bounding_box().to_rect()
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` representing the cell boundary,
    /// suitable for spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }

    /// Whether a WGS84 coordinate lies inside (or on the edge of) this cell.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounding_box()
            .contains(coord.latitude(), coord.longitude())
    }

    /// The same-sized cell next to this one.
    pub fn adjacent(&self, direction: Direction) -> Result<Self, GeohashError> {
        Self::from_geohash(&get_adjacent(&self.id, direction)?)
    }

    /// The enclosing cell one character shorter, if any.
    pub fn parent(&self) -> Option<Result<Self, GeohashError>> {
        if self.precision <= 1 {
            return None;
        }
        Some(Self::from_geohash(&self.id[..self.precision - 1]))
    }
}

impl TryFrom<&str> for GeohashCell {
    type Error = GeohashError;

    fn try_from(geohash: &str) -> Result<Self, Self::Error> {
        Self::from_geohash(geohash)
    }
}

/// Polygon of a geohash cell, for callers that only hold the string.
pub fn cell_polygon(geohash: &str) -> Result<Polygon<f64>, GeohashError> {
    Ok(get_bounding_box(geohash)?.to_polygon())
}
