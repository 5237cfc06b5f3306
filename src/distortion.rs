//! The empirical GCJ-02 distortion model.
//!
//! GCJ-02 offsets are generated by a published curve fit, not a derivable
//! projection: a low-order polynomial in shifted lon/lat plus four
//! sinusoidal correction terms per axis, followed by a Krasovsky-1940
//! ellipsoid correction. Every constant and the order of floating-point
//! operations are reproduced exactly from the reference algorithm —
//! "simplifying" the algebra would break bit-compatibility with other
//! GCJ-02 implementations.

use std::f64::consts::PI;

use crate::coord::Offset;
use crate::ellipsoid::KRASOVSKY_1940;

/// Rectangular bounding box approximating mainland China. GCJ-02
/// obfuscation only applies inside it.
///
/// This is a cheap heuristic, not a precise polygon; points near the border
/// may be misclassified.
pub fn out_of_china(lat: f64, lon: f64) -> bool {
    lon < 72.004 || lon > 137.8347 || lat < 0.8293 || lat > 55.8271
}

/// Raw latitude correction series. `x`/`y` are lon/lat shifted by
/// (105, 35) to center the expansion near China's geographic center.
fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret =
        -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

/// Raw longitude correction series.
fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// Compute the GCJ-02 distortion offset at a point.
///
/// Nominally takes a WGS-84 point; the approximate decrypt path feeds it a
/// GCJ-02 point instead, a deliberate first-order approximation (the model
/// is not symmetric, but the offset field varies slowly).
pub fn delta(lat: f64, lon: f64) -> Offset {
    let a = KRASOVSKY_1940.a;
    let ee = KRASOVSKY_1940.e2;
    let d_lat = transform_lat(lon - 105.0, lat - 35.0);
    let d_lon = transform_lon(lon - 105.0, lat - 35.0);
    let rad_lat = lat / 180.0 * PI;
    let mut magic = rad_lat.sin();
    magic = 1.0 - ee * magic * magic;
    let sqrt_magic = magic.sqrt();
    Offset {
        lat: (d_lat * 180.0) / ((a * (1.0 - ee)) / (magic * sqrt_magic) * PI),
        lon: (d_lon * 180.0) / (a / sqrt_magic * rad_lat.cos() * PI),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_china_boundaries() {
        // Interior
        assert!(!out_of_china(39.9, 116.4));
        assert!(!out_of_china(22.5, 114.0));
        // Each edge of the box
        assert!(out_of_china(39.9, 72.003));
        assert!(out_of_china(39.9, 137.835));
        assert!(out_of_china(0.829, 116.4));
        assert!(out_of_china(55.83, 116.4));
        // Far outside
        assert!(out_of_china(1.0, 1.0));
        assert!(out_of_china(51.5, -0.1));
        assert!(out_of_china(-33.9, 151.2));
    }

    #[test]
    fn test_delta_magnitude_beijing() {
        // Offsets in the Beijing area are a few thousandths of a degree,
        // i.e. a few hundred metres.
        let d = delta(39.90923, 116.397428);
        assert!(d.lat.abs() > 1e-4 && d.lat.abs() < 1e-2);
        assert!(d.lon.abs() > 1e-4 && d.lon.abs() < 1e-2);
    }

    #[test]
    fn test_delta_varies_slowly() {
        // The field changes little over ~100 m, which is what makes the
        // approximate decrypt viable.
        let d1 = delta(39.90923, 116.397428);
        let d2 = delta(39.91023, 116.398428);
        assert!((d1.lat - d2.lat).abs() < 1e-5);
        assert!((d1.lon - d2.lon).abs() < 1e-5);
    }
}
