use crate::api::cell::GeohashCell;
use crate::util::error::GeohashError;
use crate::util::parse::{GeometryFormat, format_polygon, parse_geometry};
use geo::Centroid;
use geo_types::Geometry;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// For the type of geometry source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
}

/// Configuration for CSV to geohash conversion.
#[derive(Debug, Clone)]
pub struct CsvGeohashConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub precision: usize,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvGeohashConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvGeohashConfig;
    ///
    /// let config = CsvGeohashConfig::new("geometry", 9);
    /// ```
    pub fn new(geometry_column: impl Into<String>, precision: usize) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            precision,
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use geohash_rs::CsvGeohashConfig;
    ///
    /// let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 9);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        precision: usize,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            exclude_columns: Vec::new(),
            precision,
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Include the cell polygon in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToGeohash {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeohashConfig,
    ) -> Result<ConversionStats, GeohashError>;
}

impl<P: AsRef<Path>> CsvToGeohash for P {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeohashConfig,
    ) -> Result<ConversionStats, GeohashError> {
        csv_to_geohash_csv(self, output_path, config)
    }
}

/// Row counts from a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Input records read
    pub records: usize,
    /// Output rows written (one per cell)
    pub rows: usize,
}

fn geometry_to_cells(geom: Geometry<f64>, precision: usize) -> Result<Vec<GeohashCell>, GeohashError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![GeohashCell::from_wgs84(&pt, precision)?]),
        Geometry::MultiPoint(mp) => mp
            .0
            .iter()
            .map(|pt| GeohashCell::from_wgs84(pt, precision))
            .collect(),
        Geometry::LineString(line) => GeohashCell::from_line_string(&line, precision),
        Geometry::MultiLineString(mls) => {
            let mut all_cells = Vec::new();
            for line in &mls.0 {
                all_cells.extend(GeohashCell::from_line_string(line, precision)?);
            }
            Ok(all_cells)
        }
        Geometry::Polygon(poly) => poly
            .centroid()
            .map(|c| GeohashCell::from_wgs84(&c, precision))
            .into_iter()
            .collect(),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .filter_map(|poly| poly.centroid())
            .map(|c| GeohashCell::from_wgs84(&c, precision))
            .collect(),
        Geometry::GeometryCollection(gc) => {
            let mut all_cells = Vec::new();
            for g in gc.0 {
                all_cells.extend(geometry_to_cells(g, precision)?);
            }
            Ok(all_cells)
        }
        _ => Err(GeohashError::GeometryParseError(
            "Unsupported geometry type".to_string(),
        )),
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, role: &str) -> Result<usize, GeohashError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| GeohashError::CsvError(format!("{} column '{}' not found", role, name)))
}

fn parse_field(record: &csv::StringRecord, idx: usize, role: &str) -> Result<f64, GeohashError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| GeohashError::CsvError(format!("Missing {} column at index {}", role, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| GeohashError::CsvError(format!("Invalid {}: '{}'", role, raw)))
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with
/// a leading `geohash` column.
///
/// Streams rows, so memory stays flat for large files. Source location
/// columns are dropped from the output along with any `exclude_columns`.
///
/// # Example
///
/// ```no_run
/// use geohash_rs::{csv_to_geohash_csv, CsvGeohashConfig};
///
/// let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 9);
/// csv_to_geohash_csv("stops.csv", "stops_geohash.csv", &config).unwrap();
/// ```
pub fn csv_to_geohash_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvGeohashConfig,
) -> Result<ConversionStats, GeohashError> {
    let file = File::open(csv_path.as_ref())?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col, "Geometry")?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column, "Longitude")?;
            let lat_idx = column_index(&headers, lat_column, "Latitude")?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path.as_ref())?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geohash"];
    if config.include_cell_geometry.is_some() {
        header_row.push("geohash_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer.write_record(&header_row)?;

    let mut stats = ConversionStats::default();

    for result in reader.records() {
        let record = result?;
        stats.records += 1;

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    GeohashError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                geometry_to_cells(parse_geometry(geom_str)?, config.precision)?
            }
            SourceIndices::Coordinates { lon_idx, lat_idx } => {
                let lon = parse_field(&record, *lon_idx, "longitude")?;
                let lat = parse_field(&record, *lat_idx, "latitude")?;
                vec![GeohashCell::from_wgs84(&(lon, lat), config.precision)?]
            }
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.id.clone()];

            if let Some(format) = config.include_cell_geometry {
                row.push(format_polygon(&cell.to_polygon(), format));
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer.write_record(&row)?;
            stats.rows += 1;
        }
    }

    writer.flush()?;

    log::debug!(
        "annotated {} records into {} rows",
        stats.records,
        stats.rows
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(path: &Path, lines: &[&str]) -> Result<(), GeohashError> {
        let mut file = File::create(path)?;
        for line in lines {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), GeohashError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ID,Longitude,Latitude,Description",
                "1,-5.6,42.6,Somewhere in Spain",
                "2,10.40744,57.64911,Jutland",
            ],
        )?;

        let config = CsvGeohashConfig::from_coords("Longitude", "Latitude", 5);
        let stats = csv_to_geohash_csv(&csv_path, &output_path, &config)?;
        assert_eq!(stats, ConversionStats { records: 2, rows: 2 });

        let output = std::fs::read_to_string(&output_path)?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "geohash,ID,Description");
        assert_eq!(lines[1], "ezs42,1,Somewhere in Spain");
        assert_eq!(lines[2], "u4pru,2,Jutland");
        Ok(())
    }

    #[test]
    fn test_csv_geojson_geometry_column() -> Result<(), GeohashError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "ASSET_ID,TYPE,geometry",
                "CDT123,Pipe,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[-5.6,42.6]}\"",
            ],
        )?;

        let config = CsvGeohashConfig::new("geometry", 7);
        csv_to_geohash_csv(&csv_path, &output_path, &config)?;

        let output = std::fs::read_to_string(&output_path)?;
        assert!(output.starts_with("geohash,ASSET_ID,TYPE"));
        assert!(output.contains("ezs42e4,CDT123,Pipe"));
        Ok(())
    }

    #[test]
    fn test_csv_wkt_with_cell_geometry_and_exclusions() -> Result<(), GeohashError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        write_input(
            &csv_path,
            &[
                "name,geometry,Geo Point",
                "a,\"POINT(-5.6 42.6)\",ignored",
                "b,\"MULTIPOINT((-5.6 42.6),(10.40744 57.64911))\",ignored",
            ],
        )?;

        let config = CsvGeohashConfig::new("geometry", 5)
            .exclude(vec!["Geo Point".into()])
            .with_cell_geometry(GeometryFormat::Wkt);
        let stats = csv_path.to_geohash_csv(&output_path, &config)?;
        assert_eq!(stats.records, 2);
        assert_eq!(stats.rows, 3);

        let output = std::fs::read_to_string(&output_path)?;
        assert!(output.starts_with("geohash,geohash_geometry,name\n"));
        assert!(output.contains("POLYGON"));
        assert!(!output.contains("ignored"));
        assert!(output.contains("u4pru,"));
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), GeohashError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("test.csv");
        write_input(&csv_path, &["a,b", "1,2"])?;

        let config = CsvGeohashConfig::from_coords("lon", "lat", 5);
        let result = csv_to_geohash_csv(&csv_path, dir.path().join("out.csv"), &config);
        assert!(matches!(result, Err(GeohashError::CsvError(msg)) if msg.contains("lon")));
        Ok(())
    }

    #[test]
    fn test_csv_bad_coordinate() -> Result<(), GeohashError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("test.csv");
        write_input(&csv_path, &["lon,lat", "east,2"])?;

        let config = CsvGeohashConfig::from_coords("lon", "lat", 5);
        let result = csv_to_geohash_csv(&csv_path, dir.path().join("out.csv"), &config);
        assert!(matches!(result, Err(GeohashError::CsvError(_))));
        Ok(())
    }

    #[test]
    fn test_polygon_uses_centroid() -> Result<(), GeohashError> {
        let geom = parse_geometry("POLYGON((-6 42, -5.2 42, -5.2 43.2, -6 43.2, -6 42))")?;
        let cells = geometry_to_cells(geom, 5)?;
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].id, crate::core::codec::encode(42.6, -5.6, 5)?);
        Ok(())
    }
}
