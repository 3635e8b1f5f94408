use std::fmt::Write as _;

use crate::RasterError;

/// Integer sample stored in a [`RasterBuffer`].
///
/// Images only ever hold `0..=255`, but the same buffer type backs gradient
/// magnitudes and vote accumulators, which need the full `i32` range.
pub type Sample = i32;

/// Largest maximum sample value a raster may declare.
pub const MAX_SAMPLE_VALUE: Sample = 255;

/// Owned row-major grid of integer samples.
///
/// Reads outside the grid are clamped to the nearest edge sample; writes
/// outside the grid are discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    max_value: Sample,
    data: Vec<Sample>, // row-major, len = w*h
}

fn checked_len(width: usize, height: usize) -> Result<usize, RasterError> {
    let invalid = RasterError::InvalidDimensions { width, height };
    if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(invalid);
    }
    width.checked_mul(height).ok_or(invalid)
}

fn check_max_value(max_value: Sample) -> Result<(), RasterError> {
    if (1..=MAX_SAMPLE_VALUE).contains(&max_value) {
        Ok(())
    } else {
        Err(RasterError::InvalidMaxValue(max_value))
    }
}

fn alloc_samples(width: usize, height: usize, len: usize) -> Result<Vec<Sample>, RasterError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| RasterError::Allocation { width, height })?;
    Ok(data)
}

impl RasterBuffer {
    /// Allocate a zero-filled `width x height` buffer.
    pub fn new(width: usize, height: usize, max_value: Sample) -> Result<Self, RasterError> {
        check_max_value(max_value)?;
        let len = checked_len(width, height)?;
        let mut data = alloc_samples(width, height, len)?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            max_value,
            data,
        })
    }

    /// Wrap an existing row-major sample vector.
    pub fn from_samples(
        width: usize,
        height: usize,
        max_value: Sample,
        data: Vec<Sample>,
    ) -> Result<Self, RasterError> {
        check_max_value(max_value)?;
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::SampleCount {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            max_value,
            data,
        })
    }

    /// Copy this buffer, failing instead of aborting when memory runs out.
    pub fn try_clone(&self) -> Result<Self, RasterError> {
        let mut data = alloc_samples(self.width, self.height, self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            width: self.width,
            height: self.height,
            max_value: self.max_value,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_value(&self) -> Sample {
        self.max_value
    }

    /// Row-major samples.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.data
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.data
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Sample at `(x, y)` with both coordinates clamped into the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Sample {
        let cx = x.clamp(0, self.width as i32 - 1) as usize;
        let cy = y.clamp(0, self.height as i32 - 1) as usize;
        self.data[cx + self.width * cy]
    }

    /// Store `value` at `(x, y)`. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: Sample) {
        if self.contains(x, y) {
            let idx = x as usize + self.width * y as usize;
            self.data[idx] = value;
        }
    }

    /// Direct read for hot loops; the caller keeps `(x, y)` inside the grid.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Sample {
        self.data[x + self.width * y]
    }

    /// Direct write access for hot loops; the caller keeps `(x, y)` inside the grid.
    #[inline]
    pub fn at_mut(&mut self, x: usize, y: usize) -> &mut Sample {
        &mut self.data[x + self.width * y]
    }

    pub fn fill(&mut self, value: Sample) {
        self.data.fill(value);
    }

    /// Sum of all samples.
    pub fn sum(&self) -> i64 {
        self.data.iter().map(|&v| v as i64).sum()
    }

    /// `(min, max)` over the whole buffer.
    pub fn min_max(&self) -> (Sample, Sample) {
        let first = self.data[0];
        self.data
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Stretch samples linearly so that the buffer spans `[0, max_value]`.
    ///
    /// A flat buffer (min == max) has no contrast and is set to zero.
    pub fn normalize_to_range(&mut self) {
        let (min, max) = self.min_max();
        if min == max {
            log::debug!("normalize_to_range: flat buffer ({min}), zeroing");
            self.fill(0);
            return;
        }

        let span = max as i64 - min as i64;
        let scale = self.max_value as i64;
        for v in &mut self.data {
            *v = (scale * (*v as i64 - min as i64) / span) as Sample;
        }
    }

    /// Hex table of all samples, one row per line.
    pub fn dump(&self) -> String {
        let mut out = String::from("   |");
        for x in 0..self.width {
            let _ = write!(out, "{x:3}");
        }
        out.push_str("\n---+");
        for _ in 0..self.width {
            out.push_str("---");
        }
        out.push('\n');
        for y in 0..self.height {
            let _ = write!(out, "{y:3}|");
            for x in 0..self.width {
                let _ = write!(out, " {:02x}", self.at(x, y));
            }
            out.push('\n');
        }
        out
    }
}
