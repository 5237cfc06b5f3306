//! Reference ellipsoid parameters.

/// Reference ellipsoid, described by its semi-major axis and first
/// eccentricity squared.
///
/// Unlike most geodesy code, `e2` is stored as a literal rather than derived
/// from the flattening: the GCJ-02 reference algorithm fixes the exact
/// decimal value, and interoperating implementations compare bit-for-bit.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// First eccentricity squared
    pub e2: f64,
}

/// Krasovsky 1940, the ellipsoid underlying the GCJ-02 distortion model.
///
/// Nominally `a = 6378245`, `1/f = 298.3`; the eccentricity value below is
/// the one fixed by the reference algorithm.
pub const KRASOVSKY_1940: Ellipsoid = Ellipsoid {
    a: 6378245.0,
    e2: 0.00669342162296594323,
};

/// Mean spherical Earth radius (metres) used by the great-circle distance
/// helper.
pub const EARTH_RADIUS: f64 = 6371000.0;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_krasovsky_constants() {
        assert_relative_eq!(KRASOVSKY_1940.a, 6_378_245.0);
        // e2 is close to, but not exactly, 2f - f^2 for 1/f = 298.3;
        // the literal wins.
        let f = 1.0 / 298.3;
        assert!((KRASOVSKY_1940.e2 - (2.0 * f - f * f)).abs() < 1e-9);
        assert_relative_eq!(KRASOVSKY_1940.e2, 0.00669342162296594323);
    }
}
