use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use crate::calibration::Calibration;
use crate::error::SettingsError;
use crate::report::DEFAULT_NOISE_THRESHOLD;

/// Persisted session parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Max displacement of one object between two frames, px
    pub tracking_distance: f32,

    /// Used when the frame source does not report its own rate
    pub frame_rate_hz: f32,

    pub noise_threshold: f32,

    pub calibration: Calibration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracking_distance: 25.0,
            frame_rate_hz: 50.0,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            calibration: Calibration::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.tracking_distance > 0.0) {
            return Err(SettingsError::invalid_value(
                "tracking_distance",
                format!("must be positive, got {}", self.tracking_distance),
            ));
        }

        if !(self.frame_rate_hz > 0.0) || !self.frame_rate_hz.is_finite() {
            return Err(SettingsError::invalid_value(
                "frame_rate_hz",
                format!("must be a positive rate, got {}", self.frame_rate_hz),
            ));
        }

        if !(self.noise_threshold >= 0.0) {
            return Err(SettingsError::invalid_value(
                "noise_threshold",
                format!("must not be negative, got {}", self.noise_threshold),
            ));
        }

        if !(self.calibration.length_mm >= 0.0) {
            return Err(SettingsError::invalid_value(
                "calibration.length_mm",
                format!("must not be negative, got {}", self.calibration.length_mm),
            ));
        }

        Ok(())
    }

    pub fn from_json(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn to_json(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::File {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::File {
            path: path.to_path_buf(),
            source,
        })
    }
}
