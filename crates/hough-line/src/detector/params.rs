use hough_core::Sample;
use serde::{Deserialize, Serialize};

use super::DetectError;

/// Discretized range of one line parameter.
///
/// Cell `k` maps to `min + k * step` with `step = (max - min) / bins`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub bins: usize,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64, bins: usize) -> Self {
        Self { min, max, bins }
    }

    /// Width of one cell.
    #[inline]
    pub fn step(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }

    /// Continuous value at the start of cell `cell`.
    #[inline]
    pub fn value_at(&self, cell: i32) -> f64 {
        cell as f64 * self.step() + self.min
    }

    /// Nearest cell index for a continuous value. May fall outside `0..bins`.
    #[inline]
    pub fn cell_of(&self, value: f64) -> i32 {
        ((value - self.min) / self.step()).round() as i32
    }

    fn validate(&self, name: &str) -> Result<(), DetectError> {
        if self.bins == 0 || self.bins > i32::MAX as usize {
            return Err(DetectError::InvalidParams(format!(
                "{name}.bins must be in 1..={}, got {}",
                i32::MAX,
                self.bins
            )));
        }
        if !self.min.is_finite()
            || !self.max.is_finite()
            || self.min >= self.max
            || !self.step().is_finite()
        {
            return Err(DetectError::InvalidParams(format!(
                "{name} range must be finite with min < max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Farthest accumulator cell or image row a vote or drawn segment may reach.
///
/// Bresenham walks every cell between the endpoints, so this also caps the
/// work per segment.
pub const MAX_SEGMENT_REACH: f64 = (1u32 << 20) as f64;

/// Configuration for the Hough line detector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Normalized gradient magnitude a pixel must exceed to vote.
    pub threshold: Sample,
    /// Slope axis `m` of the parameter space.
    pub slope: AxisRange,
    /// Intercept axis `c` of the parameter space.
    pub intercept: AxisRange,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            threshold: 50,
            slope: AxisRange::new(-2.0, 2.0, 512),
            intercept: AxisRange::new(-512.0, 511.0, 512),
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> Result<(), DetectError> {
        self.slope.validate("slope")?;
        self.intercept.validate("intercept")
    }

    /// Check that the axes stay usable on a `width` x `height` image.
    ///
    /// Vote lines for the image corners and the rendered line at both slope
    /// limits must land within [`MAX_SEGMENT_REACH`] of the origin.
    pub fn validate_for(&self, width: usize, height: usize) -> Result<(), DetectError> {
        self.validate()?;
        let x_last = width.saturating_sub(1) as f64;
        let y_last = height.saturating_sub(1) as f64;
        let slopes = [self.slope.min, self.slope.max];

        // c = -x*m + y is linear, so its extremes sit at the corners.
        let mut reach = 0.0f64;
        for m in slopes {
            for x in [0.0, x_last] {
                for y in [0.0, y_last] {
                    let c = -x * m + y;
                    reach = reach.max(((c - self.intercept.min) / self.intercept.step()).abs());
                }
            }
            for c in [self.intercept.min, self.intercept.max] {
                reach = reach.max(c.abs()).max((m * x_last + c).abs());
            }
        }

        if reach.is_nan() || reach > MAX_SEGMENT_REACH {
            return Err(DetectError::InvalidParams(format!(
                "slope/intercept axes reach {reach:.3e} cells on a {width}x{height} image, limit is {MAX_SEGMENT_REACH}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_axes_match_reference_resolution() {
        let p = HoughParams::default();
        assert_eq!(p.threshold, 50);
        assert_relative_eq!(p.slope.step(), 4.0 / 512.0);
        assert_relative_eq!(p.intercept.step(), 1023.0 / 512.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn cell_mapping_is_affine() {
        let axis = AxisRange::new(-2.0, 2.0, 512);
        assert_eq!(axis.cell_of(-2.0), 0);
        assert_eq!(axis.cell_of(2.0), 512);
        assert_eq!(axis.cell_of(1.0), 384);
        assert_relative_eq!(axis.value_at(384), 1.0);
        assert_relative_eq!(axis.value_at(256), 0.0);
        for cell in [0, 17, 255, 511] {
            assert_eq!(axis.cell_of(axis.value_at(cell)), cell);
        }
    }

    #[test]
    fn intercept_rounds_half_away_from_zero() {
        let axis = AxisRange::new(-512.0, 511.0, 512);
        // 512 / (1023 / 512) = 256.25
        assert_eq!(axis.cell_of(0.0), 256);
        assert_relative_eq!(axis.value_at(256), -0.5);
    }

    #[test]
    fn rejects_degenerate_axes() {
        let mut p = HoughParams::default();
        p.slope.bins = 0;
        assert!(matches!(p.validate(), Err(DetectError::InvalidParams(_))));

        let mut p = HoughParams::default();
        p.intercept = AxisRange::new(3.0, 3.0, 10);
        assert!(matches!(p.validate(), Err(DetectError::InvalidParams(_))));

        let mut p = HoughParams::default();
        p.slope.max = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn defaults_fit_large_images() {
        let p = HoughParams::default();
        assert!(p.validate_for(5, 5).is_ok());
        assert!(p.validate_for(4096, 4096).is_ok());
    }

    #[test]
    fn rejects_axes_too_wide_for_the_image() {
        let p = HoughParams {
            slope: AxisRange::new(-1e9, 1e9, 8),
            ..HoughParams::default()
        };
        assert!(p.validate().is_ok());
        assert!(matches!(
            p.validate_for(5, 5),
            Err(DetectError::InvalidParams(_))
        ));

        let p = HoughParams {
            intercept: AxisRange::new(-1e12, 1e12, 8),
            ..HoughParams::default()
        };
        assert!(matches!(
            p.validate_for(5, 5),
            Err(DetectError::InvalidParams(_))
        ));

        let p = HoughParams {
            slope: AxisRange::new(-f64::MAX, f64::MAX, 8),
            ..HoughParams::default()
        };
        assert!(matches!(p.validate(), Err(DetectError::InvalidParams(_))));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p: HoughParams = serde_json::from_str(r#"{ "threshold": 80 }"#).expect("json");
        assert_eq!(p.threshold, 80);
        assert_eq!(p.slope, HoughParams::default().slope);
    }
}
