use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("lat and lon must have the same length, got {lat} and {lon}")]
    LengthMismatch { lat: usize, lon: usize },
}
