//! # geohash-rs
//!
//! Geohash encoding, decoding and neighbour lookup, with helpers for
//! bounding boxes, distances, aggregate statistics and CSV annotation.
//!
//! There are currently four main entry points.
//!
//! ### 1. Codec functions
//!
//! ```
//! use geohash_rs::{decode_exactly, encode};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let geohash = encode(42.6, -5.6, 5)?;
//! assert_eq!(geohash, "ezs42");
//!
//! let exact = decode_exactly(&geohash)?;
//! assert!((exact.latitude - 42.6).abs() <= exact.latitude_error);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Neighbours
//!
//! ```
//! use geohash_rs::{Direction, get_adjacent};
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! assert_eq!(get_adjacent("kd3ybyu", Direction::Right)?, "kd3ybyv");
//! // longitude wraps across the antimeridian, latitude stops at the poles
//! assert_eq!(get_adjacent("z", Direction::Right)?, "b");
//! assert!(get_adjacent("gzzzzz", Direction::Top).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `GeohashCell` - Single Cell Operations
//!
//! ```
//! use geohash_rs::GeohashCell;
//!
//! # fn main() -> Result<(), geohash_rs::GeohashError> {
//! let cell = GeohashCell::from_wgs84(&(10.40744, 57.64911), 11)?;
//! println!("{}", cell.id);
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 4. `CsvToGeohash` - CSV File Conversion
//!
//! Convert CSV files with geometry columns (WKT or GeoJSON) to geohash-indexed CSVs:
//!
//! ```no_run
//! use geohash_rs::{CsvGeohashConfig, CsvToGeohash, GeometryFormat};
//!
//! let config = CsvGeohashConfig::new("geometry", 9)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_geohash_csv("output.csv", &config).unwrap();
//! ```
//!
//! Or use separate longitude and latitude columns:
//!
//! ```no_run
//! use geohash_rs::{CsvGeohashConfig, csv_to_geohash_csv};
//!
//! let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 9);
//! csv_to_geohash_csv("bus_stops.csv", "output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod util;

pub use api::stats;
pub use api::{
    BoundingBox, ConversionStats, CoordinateSource, CsvGeohashConfig, CsvToGeohash, GeohashCell,
    cell_polygon, csv_to_geohash_csv, decode_bounds, decode_exactly_many, decode_many,
    do_boxes_intersect, encode_many, geohash_approximate_distance,
    geohash_approximate_distance_checked, geohash_haversine_distance, geohashes_in_box,
    get_bounding_box, haversine_distance, is_point_in_box, is_point_in_geohash,
};
pub use core::{
    BASE32_ALPHABET, DEFAULT_PRECISION, Direction, EARTH_RADIUS, ExactLatLong, LatLong,
    MAX_PRECISION, decode, decode_exactly, encode, encode_strictly, get_adjacent,
    get_adjacent_str,
};
pub use util::{
    Coordinate, GeohashError, GeometryFormat, is_valid_geohash, is_valid_latitude,
    is_valid_longitude,
};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), GeohashError> {
        let geohash = encode(57.64911, 10.40744, 11)?;
        assert_eq!(geohash, "u4pruydqqvj");

        let exact = decode_exactly(&geohash)?;
        let bbox = decode_bounds(&geohash)?;
        assert!(bbox.contains(exact.latitude, exact.longitude));
        assert!(is_point_in_geohash(57.64911, 10.40744, &geohash)?);

        let cell = GeohashCell::from_geohash(&geohash)?;
        assert_eq!(cell.bounding_box(), bbox);
        assert_eq!(cell.to_polygon().exterior().coords().count(), 5);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), GeohashError> {
        let pt = point! { x: -5.6, y: 42.6 };
        let cell = GeohashCell::from_wgs84(&pt, 5)?;
        assert_eq!(cell.id, "ezs42");
        assert_eq!(encode_many(&[pt], 5)?, vec!["ezs42"]);
        Ok(())
    }

    #[test]
    fn test_neighbours_surround_cell() -> Result<(), GeohashError> {
        let centre = "9q8yyk";
        let centre_box = get_bounding_box(centre)?;

        for direction in Direction::ALL {
            let neighbour = get_adjacent(centre, direction)?;
            assert_eq!(neighbour.len(), centre.len());
            assert!(do_boxes_intersect(&centre_box, &get_bounding_box(&neighbour)?));
            assert_eq!(get_adjacent(&neighbour, direction.opposite())?, centre);
        }
        Ok(())
    }

    #[test]
    fn test_prefix_cells_nest() -> Result<(), GeohashError> {
        let full = encode(-33.8688, 151.2093, 12)?;
        for p in 1..=12 {
            assert_eq!(encode(-33.8688, 151.2093, p)?, full[..p]);
            let outer = get_bounding_box(&full[..p])?;
            let inner = get_bounding_box(&full)?;
            assert!(outer.contains(inner.min_lat, inner.min_lon));
            assert!(outer.contains(inner.max_lat, inner.max_lon));
        }
        Ok(())
    }

    #[test]
    fn test_distances_and_stats_together() -> Result<(), GeohashError> {
        let hashes = vec![encode(51.5074, -0.1278, 9)?, encode(48.8566, 2.3522, 9)?];
        let d = geohash_haversine_distance(&hashes[0], &hashes[1])?;
        assert!(d > 340_000.0 && d < 345_000.0);
        assert_eq!(geohash_approximate_distance(&hashes[0], &hashes[1]), 20_000_000.0);

        assert!(stats::northern(&hashes)?.starts_with(&hashes[0]));
        assert!(stats::eastern(&hashes)?.starts_with(&hashes[1]));
        assert!(stats::std(&hashes)? > 0.0);
        Ok(())
    }

    #[test]
    fn test_validation_helpers() {
        assert!(is_valid_geohash("ezs42"));
        assert!(!is_valid_geohash("ezs4a"));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_longitude(180.5));
    }
}
