//! JSON configuration and report helpers.

use crate::{AxisRange, DetectError, DetectedLine, HoughParams, LineDetector};
use hough_core::{RasterBuffer, Sample};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum HoughIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Detector overrides loaded from JSON. Missing fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoughConfig {
    #[serde(default)]
    pub threshold: Option<Sample>,
    #[serde(default)]
    pub slope: Option<AxisRange>,
    #[serde(default)]
    pub intercept: Option<AxisRange>,
}

impl HoughConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, HoughIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), HoughIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Build detector parameters, applying overrides onto the defaults.
    pub fn build_params(&self) -> HoughParams {
        let mut params = HoughParams::default();
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(slope) = self.slope {
            params.slope = slope;
        }
        if let Some(intercept) = self.intercept {
            params.intercept = intercept;
        }
        params
    }

    /// Build a detector from this config.
    pub fn build_detector(&self) -> Result<LineDetector, DetectError> {
        LineDetector::new(self.build_params())
    }
}

/// Summary of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDetectionReport {
    pub width: usize,
    pub height: usize,
    pub max_value: Sample,
    pub params: HoughParams,
    pub line: DetectedLine,
    /// Rounded endpoints of the rendered segment, absent when nothing was drawn.
    #[serde(default)]
    pub segment: Option<[[i32; 2]; 2]>,
}

impl LineDetectionReport {
    pub fn new(src: &RasterBuffer, params: &HoughParams, line: DetectedLine) -> Self {
        let segment = line.is_supported().then(|| {
            let ((x0, y0), (x1, y1)) = line.endpoints(src.width());
            [[x0, y0], [x1, y1]]
        });
        Self {
            width: src.width(),
            height: src.height(),
            max_value: src.max_value(),
            params: *params,
            line,
            segment,
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, HoughIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), HoughIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
