//! geohash CLI entry point

use clap::{Parser, Subcommand, ValueEnum};
use geohash_rs::{
    CsvGeohashConfig, DEFAULT_PRECISION, Direction, GeometryFormat, csv_to_geohash_csv,
    decode, decode_bounds, decode_exactly, encode, geohash_approximate_distance_checked,
    geohash_haversine_distance, get_adjacent, stats,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geohash")]
#[command(about = "Encode, decode and inspect geohashes")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum GeometryFormatArg {
    #[value(name = "wkt")]
    Wkt,
    #[value(name = "geojson")]
    GeoJson,
}

impl From<GeometryFormatArg> for GeometryFormat {
    fn from(arg: GeometryFormatArg) -> Self {
        match arg {
            GeometryFormatArg::Wkt => GeometryFormat::Wkt,
            GeometryFormatArg::GeoJson => GeometryFormat::GeoJson,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a latitude/longitude pair
    Encode {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        /// Number of characters (1-12)
        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,
    },
    /// Decode a geohash to the centre of its cell
    Decode {
        geohash: String,
        /// Include the error margins
        #[arg(short, long)]
        exact: bool,
    },
    /// Print the bounding box of a geohash
    Bounds { geohash: String },
    /// Find the neighbouring cell in a direction (top, right, bottom, left)
    Adjacent { geohash: String, direction: Direction },
    /// Distance in meters between two geohashes
    Distance {
        first: String,
        second: String,
        /// Use the shared-prefix lookup instead of haversine
        #[arg(short, long)]
        approximate: bool,
    },
    /// Aggregate statistics over a set of geohashes
    Stats {
        #[arg(required = true)]
        geohashes: Vec<String>,
    },
    /// Add a geohash column to a CSV file
    Csv {
        input: PathBuf,
        output: PathBuf,
        /// Column holding WKT or GeoJSON geometry
        #[arg(long, conflicts_with_all = ["lon_column", "lat_column"])]
        geometry_column: Option<String>,
        #[arg(long, requires = "lat_column")]
        lon_column: Option<String>,
        #[arg(long, requires = "lon_column")]
        lat_column: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,
        /// Columns to drop from the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Also write each cell's polygon
        #[arg(long)]
        cell_geometry: Option<GeometryFormatArg>,
    },
}

#[derive(Serialize)]
struct Summary {
    mean: String,
    northern: String,
    southern: String,
    eastern: String,
    western: String,
    variance: f64,
    std: f64,
}

fn emit<T: Serialize>(json: bool, value: &T, plain: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", plain());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            latitude,
            longitude,
            precision,
        } => {
            let geohash = encode(latitude, longitude, precision)?;
            emit(cli.json, &geohash, || geohash.clone())?;
        }

        Commands::Decode { geohash, exact } => {
            if exact {
                let decoded = decode_exactly(&geohash)?;
                emit(cli.json, &decoded, || {
                    format!(
                        "{} {} ±{} ±{}",
                        decoded.latitude,
                        decoded.longitude,
                        decoded.latitude_error,
                        decoded.longitude_error
                    )
                })?;
            } else {
                let decoded = decode(&geohash)?;
                emit(cli.json, &decoded, || {
                    format!("{} {}", decoded.latitude, decoded.longitude)
                })?;
            }
        }

        Commands::Bounds { geohash } => {
            let bbox = decode_bounds(&geohash)?;
            emit(cli.json, &bbox, || {
                format!(
                    "{} {} {} {}",
                    bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
                )
            })?;
        }

        Commands::Adjacent { geohash, direction } => {
            let neighbour = get_adjacent(&geohash, direction)?;
            emit(cli.json, &neighbour, || neighbour.clone())?;
        }

        Commands::Distance {
            first,
            second,
            approximate,
        } => {
            let meters = if approximate {
                geohash_approximate_distance_checked(&first, &second)?
            } else {
                geohash_haversine_distance(&first, &second)?
            };
            emit(cli.json, &meters, || meters.to_string())?;
        }

        Commands::Stats { geohashes } => {
            let summary = Summary {
                mean: stats::mean(&geohashes)?,
                northern: stats::northern(&geohashes)?,
                southern: stats::southern(&geohashes)?,
                eastern: stats::eastern(&geohashes)?,
                western: stats::western(&geohashes)?,
                variance: stats::variance(&geohashes)?,
                std: stats::std(&geohashes)?,
            };
            emit(cli.json, &summary, || {
                format!(
                    "mean:     {}\nnorthern: {}\nsouthern: {}\neastern:  {}\nwestern:  {}\nvariance: {}\nstd:      {}",
                    summary.mean,
                    summary.northern,
                    summary.southern,
                    summary.eastern,
                    summary.western,
                    summary.variance,
                    summary.std
                )
            })?;
        }

        Commands::Csv {
            input,
            output,
            geometry_column,
            lon_column,
            lat_column,
            precision,
            exclude,
            cell_geometry,
        } => {
            let mut config = match (geometry_column, lon_column, lat_column) {
                (Some(column), _, _) => CsvGeohashConfig::new(column, precision),
                (None, Some(lon), Some(lat)) => CsvGeohashConfig::from_coords(lon, lat, precision),
                _ => anyhow::bail!("either --geometry-column or --lon-column and --lat-column is required"),
            };
            config = config.exclude(exclude);
            if let Some(format) = cell_geometry {
                config = config.with_cell_geometry(format.into());
            }

            eprintln!("Converting CSV file: {:?} -> {:?}", input, output);
            let result = csv_to_geohash_csv(&input, &output, &config)?;
            eprintln!("Total records:   {}", result.records);
            eprintln!("Rows written:    {}", result.rows);
        }
    }

    Ok(())
}
