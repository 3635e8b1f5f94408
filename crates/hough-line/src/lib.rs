//! Detect the most prominent straight line in a grayscale image.
//!
//! The detector computes a Sobel gradient-magnitude map, lets every pixel
//! whose normalized magnitude exceeds a threshold vote for all lines
//! `y = m*x + c` through it, picks the `(m, c)` cell with the most votes and
//! draws that line in black onto a copy of the input.
//!
//! ## Quickstart
//!
//! ```no_run
//! use hough_line::{pgm, HoughParams, LineDetector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let src = pgm::read_pgm_file("input.pgm")?;
//! let detector = LineDetector::new(HoughParams::default())?;
//! let detection = detector.detect(&src)?;
//! println!("y = {} * x + {}", detection.line.slope, detection.line.intercept);
//! pgm::write_pgm_file("output.pgm", &detection.image)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `hough_line::core`: raster buffers, Bresenham drawing, Sobel edges, logging.
//! - `hough_line::pgm`: `P5` reader/writer.
//! - `hough_line::io`: JSON config overrides and detection reports.
//! - `hough_line::detect` (feature `image`): helpers for `image::GrayImage`.

mod accumulator;
mod detector;
pub mod io;
pub mod pgm;

#[cfg(feature = "image")]
pub mod detect;

pub use hough_core as core;

pub use accumulator::{ParameterSpace, Peak, VoteLine};
pub use detector::{
    AxisRange, DetectError, DetectedLine, HoughParams, LineDetection, LineDetector,
    MAX_SEGMENT_REACH,
};
pub use io::{HoughConfig, HoughIoError, LineDetectionReport};
pub use pgm::PgmError;
