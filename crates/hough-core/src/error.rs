/// Errors produced while creating raster buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("failed to allocate a {width}x{height} raster buffer")]
    Allocation { width: usize, height: usize },

    #[error("invalid raster dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("maximum sample value {0} is outside 1..=255")]
    InvalidMaxValue(i32),

    #[error("sample buffer length mismatch (expected {expected}, got {got})")]
    SampleCount { expected: usize, got: usize },
}
