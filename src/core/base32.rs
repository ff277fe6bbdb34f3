use crate::core::constants::{BASE32_ALPHABET, MAX_PRECISION};
use crate::util::error::GeohashError;

const ALPHABET: &[u8; 32] = match BASE32_ALPHABET.as_bytes().first_chunk::<32>() {
    Some(chunk) => chunk,
    None => panic!("base32 alphabet must have 32 characters"),
};

const INVALID: u8 = u8::MAX;

/// ASCII byte -> 5-bit index, `INVALID` for everything outside the alphabet.
/// Upper-case letters map to the same index as their lower-case form.
static DECODE_MAP: [u8; 128] = build_decode_map();

const fn build_decode_map() -> [u8; 128] {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        map[c as usize] = i as u8;
        map[c.to_ascii_uppercase() as usize] = i as u8;
        i += 1;
    }
    map
}

/// Returns the 5-bit value of a base32 character, if it is one.
pub fn char_to_index(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match DECODE_MAP[c as usize] {
        INVALID => None,
        value => Some(value),
    }
}

/// Returns the base32 character for a 5-bit value.
///
/// Only the low five bits of `index` are used.
pub fn index_to_char(index: u8) -> char {
    ALPHABET[(index & 0x1f) as usize] as char
}

/// Validates a geohash and returns its characters as 5-bit values.
///
/// Length is checked first, then every character, so no interval math ever
/// runs on a bad input.
pub(crate) fn to_indices(geohash: &str) -> Result<Vec<u8>, GeohashError> {
    let len = geohash.chars().count();
    if len == 0 || len > MAX_PRECISION {
        return Err(GeohashError::InvalidLength(len));
    }

    geohash
        .chars()
        .enumerate()
        .map(|(position, character)| {
            char_to_index(character).ok_or(GeohashError::InvalidCharacter {
                character,
                position,
            })
        })
        .collect()
}

pub(crate) fn from_indices(indices: &[u8]) -> String {
    indices.iter().map(|&i| index_to_char(i)).collect()
}

/// Splits a 5-bit character value into its `(lon_bits, lat_bits)` parts.
///
/// When `lon_first` is set the character starts on a longitude bit and the
/// layout is `lon lat lon lat lon` (3 longitude bits, 2 latitude bits);
/// otherwise it is `lat lon lat lon lat`.
pub const fn deinterleave(value: u8, lon_first: bool) -> (u8, u8) {
    let b4 = (value >> 4) & 1;
    let b3 = (value >> 3) & 1;
    let b2 = (value >> 2) & 1;
    let b1 = (value >> 1) & 1;
    let b0 = value & 1;

    let three = (b4 << 2) | (b2 << 1) | b0;
    let two = (b3 << 1) | b1;

    if lon_first { (three, two) } else { (two, three) }
}

/// Inverse of [`deinterleave`].
pub const fn interleave(lon_bits: u8, lat_bits: u8, lon_first: bool) -> u8 {
    let (three, two) = if lon_first {
        (lon_bits, lat_bits)
    } else {
        (lat_bits, lon_bits)
    };

    (((three >> 2) & 1) << 4)
        | (((two >> 1) & 1) << 3)
        | (((three >> 1) & 1) << 2)
        | ((two & 1) << 1)
        | (three & 1)
}

/// Width in bits of the `(lon, lat)` parts of a character.
pub const fn axis_widths(lon_first: bool) -> (u8, u8) {
    if lon_first { (3, 2) } else { (2, 3) }
}
