use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("baseline zoom {baseline} must not exceed the reset threshold {threshold}")]
    BaselineAboveThreshold { baseline: f64, threshold: f64 },

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("wheel zoom factor must be greater than 1, got {0}")]
    WheelFactor(f64),
}

/// Timing and thresholds for camera animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTuning {
    /// Requests made above this zoom zoom back out before travelling.
    pub reset_zoom_threshold: f64,
    /// Zoom the reset maneuver returns to.
    pub baseline_zoom: f64,
    pub reset_duration_ms: u64,
    /// Hold between the reset and the original request.
    pub reset_pause_ms: u64,
    pub default_duration_ms: u64,
    /// Zoom ratios beyond this (or below its reciprocal) interpolate in log space.
    pub log_space_ratio: f64,
    pub wheel_zoom_factor: f64,
}

impl AnimationTuning {
    #[must_use]
    pub fn reset_duration(&self) -> Duration {
        Duration::from_millis(self.reset_duration_ms)
    }

    #[must_use]
    pub fn reset_pause(&self) -> Duration {
        Duration::from_millis(self.reset_pause_ms)
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("reset_zoom_threshold", self.reset_zoom_threshold),
            ("baseline_zoom", self.baseline_zoom),
            ("log_space_ratio", self.log_space_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.baseline_zoom > self.reset_zoom_threshold {
            return Err(TuningError::BaselineAboveThreshold {
                baseline: self.baseline_zoom,
                threshold: self.reset_zoom_threshold,
            });
        }

        if !self.wheel_zoom_factor.is_finite() || self.wheel_zoom_factor <= 1.0 {
            return Err(TuningError::WheelFactor(self.wheel_zoom_factor));
        }

        Ok(())
    }
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            reset_zoom_threshold: 2.0,
            baseline_zoom: 1.0,
            reset_duration_ms: 500,
            reset_pause_ms: 100,
            default_duration_ms: 2000,
            log_space_ratio: 100.0,
            wheel_zoom_factor: 1.05,
        }
    }
}
