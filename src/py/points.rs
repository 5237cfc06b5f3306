//! PyO3 bindings for batch coordinate transforms.
//!
//! The external caller exchanges parallel 1-D lat/lon arrays; each function
//! validates lengths, releases the GIL for the batch work, and returns new
//! arrays in the same order.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::transform;

type LatLonArrays<'py> = (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>);

fn to_vecs(
    lat: &PyReadonlyArray1<'_, f64>,
    lon: &PyReadonlyArray1<'_, f64>,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let lat = lat.as_array().to_vec();
    let lon = lon.as_array().to_vec();
    if lat.len() != lon.len() {
        return Err(PyValueError::new_err(format!(
            "lat and lon must have same length, got {} and {}",
            lat.len(),
            lon.len()
        )));
    }
    Ok((lat, lon))
}

fn to_arrays(py: Python<'_>, lat: Vec<f64>, lon: Vec<f64>) -> LatLonArrays<'_> {
    (
        PyArray1::from_owned_array(py, ndarray::Array1::from(lat)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(lon)),
    )
}

/// Transform WGS-84 points to GCJ-02.
///
/// Args:
///     lat: 1D array of WGS-84 latitudes (degrees).
///     lon: 1D array of WGS-84 longitudes (degrees).
///
/// Returns:
///     Tuple of (lat, lon) arrays in GCJ-02, same order.
#[pyfunction]
#[pyo3(signature = (lat, lon))]
pub fn encrypt_points<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
) -> PyResult<LatLonArrays<'py>> {
    let (mut lat, mut lon) = to_vecs(&lat, &lon)?;
    py.allow_threads(|| {
        transform::encrypt_slices(&mut lat, &mut lon)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;
    Ok(to_arrays(py, lat, lon))
}

/// Transform GCJ-02 points to WGS-84 using the closed-form approximation
/// (metre-level error).
#[pyfunction]
#[pyo3(signature = (lat, lon))]
pub fn decrypt_points_approx<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
) -> PyResult<LatLonArrays<'py>> {
    let (mut lat, mut lon) = to_vecs(&lat, &lon)?;
    py.allow_threads(|| {
        transform::decrypt_approx_slices(&mut lat, &mut lon)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;
    Ok(to_arrays(py, lat, lon))
}

/// Transform GCJ-02 points to WGS-84 by iterative refinement (~1e-9 degree
/// accuracy).
#[pyfunction]
#[pyo3(signature = (lat, lon))]
pub fn decrypt_points_exact<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
) -> PyResult<LatLonArrays<'py>> {
    let (mut lat, mut lon) = to_vecs(&lat, &lon)?;
    py.allow_threads(|| {
        transform::decrypt_exact_slices(&mut lat, &mut lon)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;
    Ok(to_arrays(py, lat, lon))
}

/// Great-circle distance in metres between two points given in degrees.
#[pyfunction]
#[pyo3(signature = (lat_a, lon_a, lat_b, lon_b))]
pub fn distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    crate::distance::great_circle_distance(lat_a, lon_a, lat_b, lon_b)
}
