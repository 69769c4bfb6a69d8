// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture configuration: detection tunables, the decode size cap, and the
// rectifier's sampling mode.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the rectifier reads source pixels at fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Nearest source pixel.
    Nearest,
    /// Weighted average of the four surrounding pixels, replicating the border.
    #[default]
    Bilinear,
}

/// Tunables for the threshold-and-projection document detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Dark threshold is `mean - threshold_stddev_factor * stddev`.
    pub threshold_stddev_factor: f64,
    /// Lower clamp for the dark threshold (luma units, 0-255).
    pub threshold_min: f64,
    /// Upper clamp for the dark threshold (luma units, 0-255).
    pub threshold_max: f64,
    /// A row/column counts as signal only if its dark ratio reaches at least this.
    pub min_ratio_floor: f64,
    /// ...and at least this fraction of the strongest row/column.
    pub peak_ratio_factor: f64,
    /// Padding added on each side of the detected box, as a fraction of its size.
    pub padding_fraction: f64,
    /// Images whose luma stddev is below this are treated as blank.
    pub min_contrast_stddev: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold_stddev_factor: 0.35,
            threshold_min: 35.0,
            threshold_max: 165.0,
            min_ratio_floor: 0.008,
            peak_ratio_factor: 0.2,
            padding_fraction: 0.01,
            min_contrast_stddev: 2.0,
        }
    }
}

/// Settings for the data-URL capture flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Longest edge (pixels) an image is downscaled to before detection.
    pub max_edge: u32,
    /// Sampling mode used when rectifying.
    pub sampling: Sampling,
    /// Detector tunables.
    pub detection: DetectionConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_edge: 900,
            sampling: Sampling::default(),
            detection: DetectionConfig::default(),
        }
    }
}

impl CaptureConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportscanError;
    use std::io::Write;

    #[test]
    fn defaults_match_detector_constants() {
        let cfg = CaptureConfig::default();
        assert_eq!(cfg.max_edge, 900);
        assert_eq!(cfg.sampling, Sampling::Bilinear);
        assert_eq!(cfg.detection.threshold_min, 35.0);
        assert_eq!(cfg.detection.threshold_max, 165.0);
        assert_eq!(cfg.detection.padding_fraction, 0.01);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg = CaptureConfig::from_json_str(
            r#"{ "sampling": "nearest", "detection": { "peak_ratio_factor": 0.3 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.sampling, Sampling::Nearest);
        assert_eq!(cfg.max_edge, 900);
        assert_eq!(cfg.detection.peak_ratio_factor, 0.3);
        assert_eq!(cfg.detection.min_ratio_floor, 0.008);
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = CaptureConfig::from_json_str("{ max_edge: ").unwrap_err();
        assert!(matches!(err, ReportscanError::Serialization(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_edge": 1200 }}"#).unwrap();

        let cfg = CaptureConfig::load(file.path()).unwrap();
        assert_eq!(cfg.max_edge, 1200);
        assert_eq!(cfg.detection, DetectionConfig::default());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CaptureConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ReportscanError::Io(_)));
    }
}
