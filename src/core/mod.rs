pub mod adjacency;
pub mod base32;
pub mod codec;
pub mod constants;

pub use adjacency::{Direction, get_adjacent, get_adjacent_str};
pub use base32::{char_to_index, index_to_char};
pub use codec::{ExactLatLong, LatLong, decode, decode_exactly, encode, encode_strictly};
pub use constants::{
    BASE32_ALPHABET, BITS_PER_CHAR, DEFAULT_PRECISION, EARTH_RADIUS, LATITUDE_RANGE,
    LONGITUDE_RANGE, MAX_PRECISION, PREFIX_DISTANCES,
};
