//! Sobel gradient magnitude.

use crate::{RasterBuffer, RasterError, Sample};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One pixel of the gradient map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSample {
    pub x: i32,
    pub y: i32,
    pub magnitude: Sample,
}

/// Horizontal and vertical 3x3 Sobel responses at `(x, y)` using clamped reads.
#[inline]
pub fn gradient_at(src: &RasterBuffer, x: i32, y: i32) -> (Sample, Sample) {
    let p = |dx: i32, dy: i32| src.get(x + dx, y + dy);

    let gx = -p(-1, -1) + p(1, -1) - 2 * p(-1, 0) + 2 * p(1, 0) - p(-1, 1) + p(1, 1);
    let gy = -p(-1, -1) - 2 * p(0, -1) - p(1, -1) + p(-1, 1) + 2 * p(0, 1) + p(1, 1);
    (gx, gy)
}

/// Normalized gradient-magnitude map of a source raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    magnitude: RasterBuffer,
}

impl EdgeMap {
    /// Magnitudes stretched to `[0, max_value]` of the source.
    pub fn magnitude(&self) -> &RasterBuffer {
        &self.magnitude
    }

    pub fn into_inner(self) -> RasterBuffer {
        self.magnitude
    }

    /// Pixels whose magnitude is strictly greater than `threshold`, row-major.
    pub fn edges_above(&self, threshold: Sample) -> impl Iterator<Item = EdgeSample> + '_ {
        let w = self.magnitude.width();
        let h = self.magnitude.height();
        (0..h)
            .flat_map(move |y| (0..w).map(move |x| (x, y)))
            .filter_map(move |(x, y)| {
                let magnitude = self.magnitude.at(x, y);
                (magnitude > threshold).then_some(EdgeSample {
                    x: x as i32,
                    y: y as i32,
                    magnitude,
                })
            })
    }
}

/// Compute `round(sqrt(gx^2 + gy^2))` for every pixel and normalize the result.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width(), height = src.height()))
)]
pub fn extract_edges(src: &RasterBuffer) -> Result<EdgeMap, RasterError> {
    let mut magnitude = RasterBuffer::new(src.width(), src.height(), src.max_value())?;

    for y in 0..src.height() {
        for x in 0..src.width() {
            let (gx, gy) = gradient_at(src, x as i32, y as i32);
            let (gx, gy) = (gx as f64, gy as f64);
            *magnitude.at_mut(x, y) = (gx * gx + gy * gy).sqrt().round() as Sample;
        }
    }

    magnitude.normalize_to_range();
    Ok(EdgeMap { magnitude })
}
