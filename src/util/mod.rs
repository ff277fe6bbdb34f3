pub mod coord;
pub mod error;
pub mod parse;
pub mod validation;

pub use coord::Coordinate;
pub use error::GeohashError;
pub use parse::{GeometryFormat, format_polygon, parse_geojson, parse_geometry, parse_wkt};
pub use validation::{is_valid_geohash, is_valid_latitude, is_valid_longitude};
