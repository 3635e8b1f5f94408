use std::fmt;

use hough_core::{RasterBuffer, Sample};
use serde::{Deserialize, Serialize};

/// The winning line `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedLine {
    pub slope: f64,
    pub intercept: f64,
    /// Accumulator column of the peak.
    pub cell_m: i32,
    /// Accumulator row of the peak.
    pub cell_c: i32,
    /// Vote total at the peak. Zero means no pixel passed the threshold and
    /// the line is the parameter-space center.
    pub votes: Sample,
    /// Number of pixels whose gradient passed the threshold.
    pub edge_points: usize,
}

impl DetectedLine {
    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Rounded endpoints of the line across an image `width` pixels wide.
    pub fn endpoints(&self, width: usize) -> ((i32, i32), (i32, i32)) {
        let x1 = width.saturating_sub(1) as f64;
        (
            (0, self.intercept.round() as i32),
            (x1 as i32, self.y_at(x1).round() as i32),
        )
    }

    /// Whether any pixel voted for this line.
    #[inline]
    pub fn is_supported(&self) -> bool {
        self.votes > 0
    }
}

/// `(m, c)=(<slope>, <intercept>)` with six significant digits.
impl fmt::Display for DetectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(m, c)=({}, {})",
            significant(self.slope),
            significant(self.intercept)
        )
    }
}

const SIGNIFICANT_DIGITS: i32 = 6;

/// Shortest form of `v` rounded to six significant digits: fixed notation for
/// decimal exponents in `-4..6`, scientific (`1.5e+07`) otherwise, trailing
/// zeros removed.
fn significant(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return v.to_string();
    }
    let sci = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= SIGNIFICANT_DIGITS {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exp) as usize;
        trim_fraction(&format!("{v:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Output of [`LineDetector::detect`](super::LineDetector::detect).
#[derive(Clone, Debug)]
pub struct LineDetection {
    /// Copy of the source with the line drawn in black.
    pub image: RasterBuffer,
    pub line: DetectedLine,
}
