use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Too many photos: {count} (maximum {max})")]
    TooManyPhotos { count: usize, max: usize },
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Failed to create PDF: {0}")]
    Backend(String),
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
    #[error("Failed to load image: {0}")]
    Image(String),
    #[error("Failed to read claim data: {0}")]
    Store(String),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
