use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Image decoding error: {0}")]
    DecodeFailure(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Measurement failed: {0}")]
    MeasurementFailure(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
