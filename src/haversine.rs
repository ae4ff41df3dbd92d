//! Great-circle distance on a spherical Earth.
//!
//! Ignores roads and terrain, and makes no attempt to handle the antimeridian
//! specially. Good enough to order sightseeing stops by proximity.

use crate::traits::DistanceMetric;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lng) points in kilometers.
///
/// Inputs are not validated. `a` is clamped to `[0, 1]` so rounding on
/// near-identical or near-antipodal points never takes the square root of a
/// negative number.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// [`DistanceMetric`] backed by [`haversine_km`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_km(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        haversine_km(from, to)
    }
}
