use pyo3::prelude::*;

mod points;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(points::encrypt_points, m)?)?;
    m.add_function(wrap_pyfunction!(points::decrypt_points_approx, m)?)?;
    m.add_function(wrap_pyfunction!(points::decrypt_points_exact, m)?)?;
    m.add_function(wrap_pyfunction!(points::distance, m)?)?;
    Ok(())
}
