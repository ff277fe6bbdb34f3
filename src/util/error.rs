use crate::core::adjacency::Direction;
use thiserror::Error;

/// Error type for geohash-rs operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeohashError {
    /// The geohash contains a character outside the base32 alphabet.
    #[error("Invalid character in geohash: '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// The geohash is empty or too long, or the precision is outside 1-12.
    #[error("Invalid length: {0} (must be between 1 and 12)")]
    InvalidLength(usize),
    /// Latitude or longitude is out of range or not finite.
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// The direction is not one of top, right, bottom, left.
    #[error("Invalid direction: '{0}' (expected top, right, bottom or left)")]
    InvalidDirection(String),
    /// There is no cell beyond the pole in this direction.
    #[error("No adjacent cell {direction} of '{geohash}'")]
    NoAdjacentCell { geohash: String, direction: Direction },
    /// An aggregate was requested over no geohashes.
    #[error("Empty input: at least one geohash is required")]
    EmptyInput,
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}

impl From<std::io::Error> for GeohashError {
    fn from(e: std::io::Error) -> Self {
        GeohashError::IoError(e.to_string())
    }
}

impl From<csv::Error> for GeohashError {
    fn from(e: csv::Error) -> Self {
        GeohashError::CsvError(e.to_string())
    }
}
