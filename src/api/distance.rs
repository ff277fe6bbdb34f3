use crate::core::codec::decode;
use crate::core::constants::{EARTH_RADIUS, PREFIX_DISTANCES};
use crate::util::error::GeohashError;
use crate::util::validation::is_valid_geohash;

fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}

/// Approximate great-circle distance in meters from the number of leading
/// characters two geohashes share.
///
/// This is a coarse lookup and does not validate its inputs; see
/// [`geohash_approximate_distance_checked`].
pub fn geohash_approximate_distance(geohash_1: &str, geohash_2: &str) -> f64 {
    let matching = shared_prefix_len(geohash_1, geohash_2).min(PREFIX_DISTANCES.len() - 1);
    PREFIX_DISTANCES[matching]
}

/// [`geohash_approximate_distance`] that rejects invalid geohashes first.
pub fn geohash_approximate_distance_checked(
    geohash_1: &str,
    geohash_2: &str,
) -> Result<f64, GeohashError> {
    for geohash in [geohash_1, geohash_2] {
        if !is_valid_geohash(geohash) {
            // decode reports the precise reason
            decode(geohash)?;
        }
    }
    Ok(geohash_approximate_distance(geohash_1, geohash_2))
}

/// Great-circle distance in meters between two positions (haversine formula).
pub fn haversine_distance(lat_1: f64, lon_1: f64, lat_2: f64, lon_2: f64) -> f64 {
    let phi_1 = lat_1.to_radians();
    let phi_2 = lat_2.to_radians();
    let delta_phi = (lat_2 - lat_1).to_radians();
    let delta_lambda = (lon_2 - lon_1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS * c
}

/// Great-circle distance in meters between the centres of two geohash cells.
pub fn geohash_haversine_distance(geohash_1: &str, geohash_2: &str) -> Result<f64, GeohashError> {
    let a = decode(geohash_1)?;
    let b = decode(geohash_2)?;
    Ok(haversine_distance(
        a.latitude,
        a.longitude,
        b.latitude,
        b.longitude,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_distance() {
        assert_eq!(geohash_approximate_distance("bcd3u", "bc83n"), 625441.0);
        assert_eq!(geohash_approximate_distance("bcd3uasd", "bcd3n"), 19545.0);
        assert_eq!(geohash_approximate_distance("bcd3u", "bcd3uasd"), 3803.0);
        assert_eq!(geohash_approximate_distance("bcd3ua", "bcd3uasdub"), 610.0);
        assert_eq!(geohash_approximate_distance("u4pru", "ezs42"), 20_000_000.0);
    }

    #[test]
    fn test_approximate_distance_caps_at_ten() {
        assert_eq!(
            geohash_approximate_distance("ezs42e44yx96", "ezs42e44yx96"),
            0.6
        );
    }

    #[test]
    fn test_approximate_distance_checked() -> Result<(), GeohashError> {
        assert!(matches!(
            geohash_approximate_distance_checked("shibu", "shiba"),
            Err(GeohashError::InvalidCharacter { character: 'i', .. })
        ));
        assert_eq!(geohash_approximate_distance_checked("bcd3u", "bc83n")?, 625441.0);
        Ok(())
    }

    #[test]
    fn test_haversine_distance() {
        assert_eq!(haversine_distance(10.0, 20.0, 10.0, 20.0), 0.0);

        // one degree along the equator
        let one_degree = EARTH_RADIUS * std::f64::consts::PI / 180.0;
        assert!((haversine_distance(0.0, 0.0, 0.0, 1.0) - one_degree).abs() < 1e-6);

        // pole to pole
        let half_circumference = EARTH_RADIUS * std::f64::consts::PI;
        assert!((haversine_distance(90.0, 0.0, -90.0, 0.0) - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn test_geohash_haversine_distance() -> Result<(), GeohashError> {
        let d = geohash_haversine_distance("testxyz", "testwxy")?;
        let a = decode("testxyz")?;
        let b = decode("testwxy")?;
        assert_eq!(d, haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude));
        assert!((d - 5888.614420771857).abs() < 1e-4);

        assert_eq!(geohash_haversine_distance("ezs42", "ezs42")?, 0.0);
        assert!(geohash_haversine_distance("", "ezs42").is_err());
        Ok(())
    }
}
