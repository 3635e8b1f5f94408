//! Slope/intercept parameter space.
//!
//! An image point `(x, y)` lies on every line `y = m*x + c` with
//! `c = -x*m + y`, which is itself a straight line in `(m, c)` space. Each
//! edge point draws that line into the accumulator; cells where many such
//! lines cross are the lines shared by many edge points.

use hough_core::{bresenham, vote_on_line, RasterBuffer, RasterError, Sample};
use serde::{Deserialize, Serialize};

use crate::AxisRange;

/// Segment in accumulator cell coordinates `(M, C)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteLine {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl VoteLine {
    /// Visit every cell of the segment, including cells outside the accumulator.
    pub fn for_each_cell<F: FnMut(i32, i32)>(&self, f: F) {
        bresenham(self.start.0, self.start.1, self.end.0, self.end.1, f);
    }
}

/// Accumulator cell holding the most votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peak {
    pub cell_m: i32,
    pub cell_c: i32,
    pub votes: Sample,
}

/// Vote accumulator over discretized `(m, c)`.
///
/// Columns are slope cells `M`, rows are intercept cells `C`.
#[derive(Clone, Debug)]
pub struct ParameterSpace {
    slope: AxisRange,
    intercept: AxisRange,
    votes: RasterBuffer,
}

impl ParameterSpace {
    /// Allocate an empty accumulator. Axes are expected to be validated.
    pub fn new(slope: AxisRange, intercept: AxisRange) -> Result<Self, RasterError> {
        let votes = RasterBuffer::new(slope.bins, intercept.bins, 255)?;
        Ok(Self {
            slope,
            intercept,
            votes,
        })
    }

    #[inline]
    pub fn slope_axis(&self) -> &AxisRange {
        &self.slope
    }

    #[inline]
    pub fn intercept_axis(&self) -> &AxisRange {
        &self.intercept
    }

    /// Raw vote totals.
    #[inline]
    pub fn votes(&self) -> &RasterBuffer {
        &self.votes
    }

    pub fn votes_mut(&mut self) -> &mut RasterBuffer {
        &mut self.votes
    }

    /// Accumulator segment for image point `(x, y)`: `c = -x*m + y` evaluated
    /// at both ends of the slope axis.
    ///
    /// The `m = max` end lands on cell `bins`, one past the last column, so the
    /// last vote of every segment falls outside and is dropped.
    pub fn vote_line_for(&self, x: i32, y: i32) -> VoteLine {
        let (x, y) = (x as f64, y as f64);
        let at = |m: f64| (self.slope.cell_of(m), self.intercept.cell_of(-x * m + y));
        VoteLine {
            start: at(self.slope.min),
            end: at(self.slope.max),
        }
    }

    /// Add `weight` along the vote line of image point `(x, y)`.
    pub fn vote(&mut self, x: i32, y: i32, weight: Sample) {
        let line = self.vote_line_for(x, y);
        vote_on_line(
            &mut self.votes,
            line.start.0,
            line.start.1,
            line.end.0,
            line.end.1,
            weight,
        );
    }

    /// Global maximum, scanning `C` rows outer and `M` columns inner.
    ///
    /// The first cell reaching the maximum wins. With no positive vote the
    /// center cell is returned with zero votes.
    pub fn peak(&self) -> Peak {
        let mut best = Peak {
            cell_m: (self.slope.bins / 2) as i32,
            cell_c: (self.intercept.bins / 2) as i32,
            votes: 0,
        };
        for c in 0..self.votes.height() {
            for m in 0..self.votes.width() {
                let v = self.votes.at(m, c);
                if v > best.votes {
                    best = Peak {
                        cell_m: m as i32,
                        cell_c: c as i32,
                        votes: v,
                    };
                }
            }
        }
        best
    }

    /// Continuous `(m, c)` of a cell.
    #[inline]
    pub fn line_at(&self, cell_m: i32, cell_c: i32) -> (f64, f64) {
        (self.slope.value_at(cell_m), self.intercept.value_at(cell_c))
    }

    /// Copy of the votes stretched to `0..=255`, for viewing as an image.
    pub fn to_normalized_image(&self) -> Result<RasterBuffer, RasterError> {
        let mut img = self.votes.try_clone()?;
        img.normalize_to_range();
        Ok(img)
    }
}
