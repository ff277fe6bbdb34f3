pub mod batch;
pub mod bounding_box;
pub mod cell;
pub mod distance;
pub mod geohash_csv;
pub mod stats;

pub use batch::{decode_exactly_many, decode_many, encode_many};
pub use bounding_box::{
    BoundingBox, decode_bounds, do_boxes_intersect, geohashes_in_box, get_bounding_box,
    is_point_in_box, is_point_in_geohash,
};
pub use cell::{GeohashCell, cell_polygon};
pub use distance::{
    geohash_approximate_distance, geohash_approximate_distance_checked,
    geohash_haversine_distance, haversine_distance,
};
pub use geohash_csv::{
    ConversionStats, CoordinateSource, CsvGeohashConfig, CsvToGeohash, csv_to_geohash_csv,
};
