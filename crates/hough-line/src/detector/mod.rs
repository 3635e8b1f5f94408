//! Hough line detection pipeline.
//!
//! This module wires together gradient extraction, thresholded voting into
//! the (slope, intercept) parameter space, peak search, and rendering of the
//! winning line onto a copy of the source image.

mod error;
mod params;
mod pipeline;
mod result;

pub use error::DetectError;
pub use params::{AxisRange, HoughParams, MAX_SEGMENT_REACH};
pub use pipeline::LineDetector;
pub use result::{DetectedLine, LineDetection};
