use hough_core::RasterError;

/// Errors returned by the line detector.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid detector parameters: {0}")]
    InvalidParams(String),

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Raster(#[from] RasterError),
}
