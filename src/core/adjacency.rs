use crate::core::base32::{axis_widths, deinterleave, from_indices, interleave, to_indices};
use crate::util::error::GeohashError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cardinal direction on the geohash grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North, increasing latitude
    Top,
    /// East, increasing longitude
    Right,
    /// South, decreasing latitude
    Bottom,
    /// West, decreasing longitude
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        }
    }

    const fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// Whether moving this way crosses the antimeridian rather than a pole
    /// when it runs off the edge of the world.
    fn wraps(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GeohashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Direction::Top),
            "right" => Ok(Direction::Right),
            "bottom" => Ok(Direction::Bottom),
            "left" => Ok(Direction::Left),
            _ => Err(GeohashError::InvalidDirection(s.to_string())),
        }
    }
}

/// Neighbour substitution and parent-border flags for one direction and one
/// character layout, indexed by 5-bit character value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AdjacencyTable {
    pub neighbor: [u8; 32],
    pub border: [bool; 32],
}

/// `TABLES[direction][parity]`, parity 0 for even-length geohashes
/// (last character starts on a latitude bit), 1 for odd.
static TABLES: [[AdjacencyTable; 2]; 4] = [
    [build_table(Direction::Top, false), build_table(Direction::Top, true)],
    [build_table(Direction::Right, false), build_table(Direction::Right, true)],
    [build_table(Direction::Bottom, false), build_table(Direction::Bottom, true)],
    [build_table(Direction::Left, false), build_table(Direction::Left, true)],
];

/// Steps every character value one cell inside its parent, wrapping at the
/// parent's edge and flagging the values that wrapped.
const fn build_table(direction: Direction, lon_first: bool) -> AdjacencyTable {
    let (lon_width, lat_width) = axis_widths(lon_first);
    let lon_max = (1u8 << lon_width) - 1;
    let lat_max = (1u8 << lat_width) - 1;

    let mut neighbor = [0u8; 32];
    let mut border = [false; 32];

    let mut value = 0u8;
    while value < 32 {
        let (lon, lat) = deinterleave(value, lon_first);
        let (next_lon, next_lat, on_border) = match direction {
            Direction::Top => (lon, (lat + 1) & lat_max, lat == lat_max),
            Direction::Bottom => (lon, lat.wrapping_sub(1) & lat_max, lat == 0),
            Direction::Right => ((lon + 1) & lon_max, lat, lon == lon_max),
            Direction::Left => (lon.wrapping_sub(1) & lon_max, lat, lon == 0),
        };
        neighbor[value as usize] = interleave(next_lon, next_lat, lon_first);
        border[value as usize] = on_border;
        value += 1;
    }

    AdjacencyTable { neighbor, border }
}

pub(crate) fn table(direction: Direction, len: usize) -> &'static AdjacencyTable {
    &TABLES[direction.index()][len % 2]
}

/// Shifts `cells` one step in `direction`, carrying into the parent when the
/// last character sits on its parent's border.
///
/// Returns `false` when the carry ran off the root cell.
fn shift(cells: &mut [u8], direction: Direction) -> bool {
    let len = cells.len();
    let Some((last, parent)) = cells.split_last_mut() else {
        return false;
    };

    let table = table(direction, len);
    let value = *last as usize;
    *last = table.neighbor[value];

    if !table.border[value] {
        return true;
    }
    if parent.is_empty() {
        return false;
    }
    shift(parent, direction)
}

/// Returns the geohash of the same-sized cell next to `geohash` in
/// `direction`.
///
/// Works on the character values directly, no coordinates are decoded.
/// Moving `Left` or `Right` off the edge of the world wraps across the
/// antimeridian; moving `Top` or `Bottom` past a pole fails with
/// [`GeohashError::NoAdjacentCell`].
///
/// # Example
///
/// ```
/// use geohash_rs::{Direction, get_adjacent};
///
/// # fn main() -> Result<(), geohash_rs::GeohashError> {
/// assert_eq!(get_adjacent("kd3ybyu", Direction::Right)?, "kd3ybyv");
/// assert_eq!(get_adjacent("u00000", Direction::Left)?, "gbpbpb");
/// # Ok(())
/// # }
/// ```
pub fn get_adjacent(geohash: &str, direction: Direction) -> Result<String, GeohashError> {
    let mut cells = to_indices(geohash)?;

    let in_world = shift(&mut cells, direction);
    if !in_world && !direction.wraps() {
        return Err(GeohashError::NoAdjacentCell {
            geohash: geohash.to_ascii_lowercase(),
            direction,
        });
    }

    Ok(from_indices(&cells))
}

/// [`get_adjacent`] with the direction given by name
/// (`"top"`, `"right"`, `"bottom"` or `"left"`).
pub fn get_adjacent_str(geohash: &str, direction: &str) -> Result<String, GeohashError> {
    let direction: Direction = direction.parse()?;
    get_adjacent(geohash, direction)
}
