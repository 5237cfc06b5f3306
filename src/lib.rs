//! GCJ-02 ↔ WGS-84 coordinate transforms.
//!
//! Public maps in mainland China use GCJ-02, an obfuscated coordinate
//! system produced by applying an empirical distortion to WGS-84 (GPS)
//! positions. This crate implements the forward transform (`encrypt`), a
//! closed-form approximate inverse (`decrypt_approx`), an iterative exact
//! inverse (`decrypt_exact`), the China bounding-box test that gates the
//! obfuscation, and a great-circle distance helper.

pub mod coord;
pub mod distance;
pub mod distortion;
pub mod ellipsoid;
pub mod error;
pub mod transform;

#[cfg(feature = "python")]
mod py;

pub use coord::{Gcj02, Offset, Wgs84};
pub use distance::great_circle_distance;
pub use distortion::out_of_china;
pub use error::TransformError;
pub use transform::{decrypt_approx, decrypt_exact, encrypt, refine, Refined};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn _gcj02(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    py::register(m)?;
    Ok(())
}
