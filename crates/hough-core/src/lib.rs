//! Core raster types and primitives for Hough line detection.
//!
//! This crate is intentionally small. It owns the integer sample buffer used
//! for images, gradient maps and parameter-space accumulators, the Bresenham
//! rasterizer that draws into it, and the Sobel edge extractor. It knows
//! nothing about line parameters or file formats.

mod draw;
mod edges;
mod error;
mod logger;
mod raster;

pub use draw::{bresenham, draw_line, vote_on_line};
pub use edges::{extract_edges, gradient_at, EdgeMap, EdgeSample};
pub use error::RasterError;
pub use raster::{RasterBuffer, Sample, MAX_SAMPLE_VALUE};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
