use crate::core::codec::{ExactLatLong, LatLong, decode, decode_exactly, encode};
use crate::util::coord::Coordinate;
use crate::util::error::GeohashError;
use rayon::prelude::*;

/// Encodes many positions in parallel, preserving order.
///
/// Positions are `Coordinate`s, so `(lon, lat)` tuples or `geo_types::Point`s.
/// Fails with the first invalid element's error.
pub fn encode_many<C>(coords: &[C], precision: usize) -> Result<Vec<String>, GeohashError>
where
    C: Coordinate + Sync,
{
    log::debug!("encoding {} positions at precision {}", coords.len(), precision);
    coords
        .par_iter()
        .map(|c| encode(c.latitude(), c.longitude(), precision))
        .collect()
}

/// Decodes many geohashes in parallel, preserving order.
pub fn decode_many<S>(geohashes: &[S]) -> Result<Vec<LatLong>, GeohashError>
where
    S: AsRef<str> + Sync,
{
    log::debug!("decoding {} geohashes", geohashes.len());
    geohashes.par_iter().map(|g| decode(g.as_ref())).collect()
}

/// [`decode_many`] keeping the error margins.
pub fn decode_exactly_many<S>(geohashes: &[S]) -> Result<Vec<ExactLatLong>, GeohashError>
where
    S: AsRef<str> + Sync,
{
    log::debug!("decoding {} geohashes with error margins", geohashes.len());
    geohashes
        .par_iter()
        .map(|g| decode_exactly(g.as_ref()))
        .collect()
}
