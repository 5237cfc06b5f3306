//! Forward and inverse GCJ-02 transforms.
//!
//! Forward (`encrypt`): apply the distortion offset to a WGS-84 point.
//! Inverse: either a single correction evaluated at the GCJ-02 point
//! (`decrypt_approx`, metre-level error) or a per-axis bisection search for
//! the WGS-84 point whose forward encryption reproduces the observed GCJ-02
//! point (`decrypt_exact` / `refine`, converges to ~1e-9 degrees).
//!
//! Points outside the China bounding box pass through every transform
//! unchanged — the obfuscation is a China-only policy.

use crate::coord::{Gcj02, Wgs84};
use crate::distortion::{delta, out_of_china};
use crate::error::TransformError;

/// Initial bracket half-width for the bisection search (degrees). Real
/// GCJ-02 offsets stay well under this, so the bracket always contains the
/// true point.
const INIT_DELTA: f64 = 0.01;

/// Convergence threshold on the forward residual (degrees).
const THRESHOLD: f64 = 1e-9;

/// Hard cap on bisection iterations. Convergence takes under 30 iterations
/// in practice; the cap only guarantees termination.
const MAX_ITERATIONS: u32 = 10_000;

/// Result of the iterative exact decryption.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Refined {
    pub coord: Wgs84,
    /// False if the iteration cap was reached before the residual dropped
    /// below threshold; `coord` is then the last midpoint tried.
    pub converged: bool,
}

/// WGS-84 → GCJ-02.
pub fn encrypt(p: Wgs84) -> Gcj02 {
    if out_of_china(p.lat, p.lon) {
        return Gcj02::new(p.lat, p.lon);
    }
    let d = delta(p.lat, p.lon);
    Gcj02::new(p.lat + d.lat, p.lon + d.lon)
}

/// GCJ-02 → WGS-84, closed form.
///
/// Evaluates the distortion offset at the GCJ-02 point rather than the
/// unknown true point, so the result carries a sub-metre-to-few-metres
/// error. Use [`decrypt_exact`] when that matters.
pub fn decrypt_approx(p: Gcj02) -> Wgs84 {
    if out_of_china(p.lat, p.lon) {
        return Wgs84::new(p.lat, p.lon);
    }
    let d = delta(p.lat, p.lon);
    Wgs84::new(p.lat - d.lat, p.lon - d.lon)
}

/// GCJ-02 → WGS-84, iterative. Best-effort: returns the last midpoint even
/// if the iteration cap is reached. Use [`refine`] to observe convergence.
pub fn decrypt_exact(p: Gcj02) -> Wgs84 {
    refine(p).coord
}

/// GCJ-02 → WGS-84 by per-axis bisection on the forward transform.
///
/// Brackets the true point at ±[`INIT_DELTA`] degrees, then repeatedly
/// encrypts the bracket midpoint and narrows the side the residual points
/// to, independently per axis. The forward map is locally monotonic, so
/// this converges to the WGS-84 point whose encryption reproduces `p`.
pub fn refine(p: Gcj02) -> Refined {
    let mut m_lat = p.lat - INIT_DELTA;
    let mut m_lon = p.lon - INIT_DELTA;
    let mut p_lat = p.lat + INIT_DELTA;
    let mut p_lon = p.lon + INIT_DELTA;
    let mut wgs = Wgs84::new(p.lat, p.lon);

    for _ in 0..MAX_ITERATIONS {
        wgs = Wgs84::new((m_lat + p_lat) / 2.0, (m_lon + p_lon) / 2.0);
        let enc = encrypt(wgs);
        let d_lat = enc.lat - p.lat;
        let d_lon = enc.lon - p.lon;
        if d_lat.abs() < THRESHOLD && d_lon.abs() < THRESHOLD {
            return Refined {
                coord: wgs,
                converged: true,
            };
        }
        if d_lat > 0.0 {
            p_lat = wgs.lat;
        } else {
            m_lat = wgs.lat;
        }
        if d_lon > 0.0 {
            p_lon = wgs.lon;
        } else {
            m_lon = wgs.lon;
        }
    }

    tracing::warn!(
        gcj_lat = p.lat,
        gcj_lon = p.lon,
        "exact decrypt hit the iteration cap, returning last midpoint"
    );
    Refined {
        coord: wgs,
        converged: false,
    }
}

/// Batch forward transform. Order- and cardinality-preserving.
pub fn encrypt_batch(points: &[Wgs84]) -> Vec<Gcj02> {
    points.iter().map(|&p| encrypt(p)).collect()
}

/// Batch approximate inverse. Order- and cardinality-preserving.
pub fn decrypt_approx_batch(points: &[Gcj02]) -> Vec<Wgs84> {
    points.iter().map(|&p| decrypt_approx(p)).collect()
}

/// Batch exact inverse. Order- and cardinality-preserving.
pub fn decrypt_exact_batch(points: &[Gcj02]) -> Vec<Wgs84> {
    points.iter().map(|&p| decrypt_exact(p)).collect()
}

/// In-place forward transform over parallel lat/lon slices.
///
/// Callers holding separate coordinate arrays (the usual array-exchange
/// boundary) can transform without building `Wgs84` values first.
pub fn encrypt_slices(lat: &mut [f64], lon: &mut [f64]) -> Result<(), TransformError> {
    check_lengths(lat, lon)?;
    for (la, lo) in lat.iter_mut().zip(lon.iter_mut()) {
        let enc = encrypt(Wgs84::new(*la, *lo));
        *la = enc.lat;
        *lo = enc.lon;
    }
    Ok(())
}

/// In-place approximate inverse over parallel lat/lon slices.
pub fn decrypt_approx_slices(lat: &mut [f64], lon: &mut [f64]) -> Result<(), TransformError> {
    check_lengths(lat, lon)?;
    for (la, lo) in lat.iter_mut().zip(lon.iter_mut()) {
        let dec = decrypt_approx(Gcj02::new(*la, *lo));
        *la = dec.lat;
        *lo = dec.lon;
    }
    Ok(())
}

/// In-place exact inverse over parallel lat/lon slices.
pub fn decrypt_exact_slices(lat: &mut [f64], lon: &mut [f64]) -> Result<(), TransformError> {
    check_lengths(lat, lon)?;
    for (la, lo) in lat.iter_mut().zip(lon.iter_mut()) {
        let dec = decrypt_exact(Gcj02::new(*la, *lo));
        *la = dec.lat;
        *lo = dec.lon;
    }
    Ok(())
}

fn check_lengths(lat: &[f64], lon: &[f64]) -> Result<(), TransformError> {
    if lat.len() != lon.len() {
        return Err(TransformError::LengthMismatch {
            lat: lat.len(),
            lon: lon.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::great_circle_distance;
    use approx::assert_abs_diff_eq;

    const BEIJING: Wgs84 = Wgs84::new(39.90923, 116.397428);

    fn china_interior() -> Vec<Wgs84> {
        vec![
            BEIJING,
            Wgs84::new(31.2304, 121.4737),  // Shanghai
            Wgs84::new(22.5431, 114.0579),  // Shenzhen
            Wgs84::new(30.6586, 104.0647),  // Chengdu
            Wgs84::new(43.8256, 87.6168),   // Urumqi
            Wgs84::new(45.8038, 126.5349),  // Harbin
        ]
    }

    #[test]
    fn test_encrypt_outside_china_is_identity() {
        let p = Wgs84::new(1.0, 1.0);
        let enc = encrypt(p);
        assert_eq!(enc.lat, p.lat);
        assert_eq!(enc.lon, p.lon);
    }

    #[test]
    fn test_decrypt_outside_china_is_identity() {
        let p = Gcj02::new(1.0, 1.0);
        let approx = decrypt_approx(p);
        assert_eq!((approx.lat, approx.lon), (1.0, 1.0));
        let exact = decrypt_exact(p);
        assert_abs_diff_eq!(exact.lat, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(exact.lon, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_beijing_offset_magnitude() {
        let enc = encrypt(BEIJING);
        let shift = great_circle_distance(BEIJING.lat, BEIJING.lon, enc.lat, enc.lon);
        // Typical GCJ-02 displacement in the Beijing area
        assert!(shift > 100.0, "offset {shift} m too small");
        assert!(shift < 1000.0, "offset {shift} m too large");
    }

    #[test]
    fn test_exact_round_trip() {
        for p in china_interior() {
            let dec = decrypt_exact(encrypt(p));
            assert_abs_diff_eq!(dec.lat, p.lat, epsilon = 2e-9);
            assert_abs_diff_eq!(dec.lon, p.lon, epsilon = 2e-9);
        }
    }

    #[test]
    fn test_beijing_exact_recovery() {
        let enc = encrypt(BEIJING);
        let dec = decrypt_exact(enc);
        assert_abs_diff_eq!(dec.lat, BEIJING.lat, epsilon = 1e-6);
        assert_abs_diff_eq!(dec.lon, BEIJING.lon, epsilon = 1e-6);
    }

    #[test]
    fn test_approx_round_trip_bounded() {
        for p in china_interior() {
            let enc = encrypt(p);
            let dec = decrypt_approx(enc);
            let err = great_circle_distance(p.lat, p.lon, dec.lat, dec.lon);
            assert!(err < 10.0, "approx error {err} m at {p:?}");
        }
    }

    #[test]
    fn test_refine_reports_convergence() {
        let r = refine(encrypt(BEIJING));
        assert!(r.converged);
    }

    #[test]
    fn test_batch_preserves_order_and_mix() {
        // Mix of in-bounds and out-of-bounds points
        let input = vec![
            Wgs84::new(1.0, 1.0),
            BEIJING,
            Wgs84::new(51.5074, -0.1278), // London
            Wgs84::new(31.2304, 121.4737),
        ];
        let out = encrypt_batch(&input);
        assert_eq!(out.len(), input.len());
        // Out-of-bounds elements unchanged, in order
        assert_eq!((out[0].lat, out[0].lon), (1.0, 1.0));
        assert_eq!((out[2].lat, out[2].lon), (51.5074, -0.1278));
        // In-bounds elements shifted
        assert!(out[1].lat != input[1].lat);
        assert!(out[3].lon != input[3].lon);
    }

    #[test]
    fn test_slice_batch_matches_scalar() {
        let mut lat = vec![39.90923, 1.0];
        let mut lon = vec![116.397428, 1.0];
        encrypt_slices(&mut lat, &mut lon).unwrap();
        let enc = encrypt(BEIJING);
        assert_eq!(lat[0], enc.lat);
        assert_eq!(lon[0], enc.lon);
        assert_eq!((lat[1], lon[1]), (1.0, 1.0));

        decrypt_exact_slices(&mut lat, &mut lon).unwrap();
        assert_abs_diff_eq!(lat[0], BEIJING.lat, epsilon = 1e-6);
        assert_abs_diff_eq!(lon[0], BEIJING.lon, epsilon = 1e-6);
    }

    #[test]
    fn test_slice_length_mismatch() {
        let mut lat = vec![39.9, 31.2];
        let mut lon = vec![116.4];
        let err = encrypt_slices(&mut lat, &mut lon).unwrap_err();
        assert!(matches!(
            err,
            TransformError::LengthMismatch { lat: 2, lon: 1 }
        ));
        assert!(decrypt_approx_slices(&mut lat, &mut lon).is_err());
        assert!(decrypt_exact_slices(&mut lat, &mut lon).is_err());
    }

    #[test]
    fn test_typed_conversion_methods() {
        let gcj = BEIJING.to_gcj02();
        assert_eq!(gcj, encrypt(BEIJING));
        let back = gcj.to_wgs84();
        assert_abs_diff_eq!(back.lat, BEIJING.lat, epsilon = 1e-6);
        let rough = gcj.to_wgs84_approx();
        assert_abs_diff_eq!(rough.lat, BEIJING.lat, epsilon = 1e-4);
    }
}
