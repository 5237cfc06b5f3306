//! Coordinate types for the two reference systems this crate converts
//! between.
//!
//! `Wgs84` and `Gcj02` are deliberately distinct types: a value's reference
//! system is part of its type, so passing a GCJ-02 point where a WGS-84
//! point is expected is a compile error rather than a silent plotting bug.
//! Both carry latitude and longitude in degrees.

/// A point in the WGS-84 reference system (standard GPS), in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wgs84 {
    /// Latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lon: f64,
}

/// A point in the GCJ-02 ("Mars") reference system used by public maps in
/// mainland China, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gcj02 {
    /// Latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lon: f64,
}

/// A latitude/longitude delta in degrees, produced by the distortion model.
/// Ephemeral — applied to a coordinate and discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Offset {
    pub lat: f64,
    pub lon: f64,
}

impl Wgs84 {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Obfuscate into GCJ-02. See [`crate::transform::encrypt`].
    pub fn to_gcj02(self) -> Gcj02 {
        crate::transform::encrypt(self)
    }
}

impl Gcj02 {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Closed-form approximate recovery of the WGS-84 point.
    /// See [`crate::transform::decrypt_approx`].
    pub fn to_wgs84_approx(self) -> Wgs84 {
        crate::transform::decrypt_approx(self)
    }

    /// Iterative exact recovery of the WGS-84 point.
    /// See [`crate::transform::decrypt_exact`].
    pub fn to_wgs84(self) -> Wgs84 {
        crate::transform::decrypt_exact(self)
    }
}
