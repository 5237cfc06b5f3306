//! Great-circle distance on a spherical Earth.

use std::f64::consts::PI;

use crate::ellipsoid::EARTH_RADIUS;

/// Distance in metres between two points given in degrees, by the spherical
/// law of cosines:
///
///   s = cos(φa)·cos(φb)·cos(λa − λb) + sin(φa)·sin(φb)
///   d = acos(s) · R
///
/// `s` is clamped to [-1, 1] first; rounding can push it just past ±1 for
/// near-identical or antipodal points, which would turn `acos` into NaN.
pub fn great_circle_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let x = (lat_a * PI / 180.0).cos()
        * (lat_b * PI / 180.0).cos()
        * ((lon_a - lon_b) * PI / 180.0).cos();
    let y = (lat_a * PI / 180.0).sin() * (lat_b * PI / 180.0).sin();
    let s = (x + y).clamp(-1.0, 1.0);
    s.acos() * EARTH_RADIUS
}
