//! Explorer settings loaded from JSON.
//!
//! Every field has a default, so an empty object `{}` is a complete config.

use crate::core::camera::tuning::{AnimationTuning, TuningError};
use crate::core::data::scene::SceneTable;
use crate::core::fractals::fractal_kind::FractalKind;
use crate::core::fractals::precision::DEFAULT_PRECISION_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid animation tuning: {0}")]
    Tuning(#[from] TuningError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub width: u32,
    pub height: u32,
    /// Target of the startup ceiling ramp.
    pub iteration_ceiling: u32,
    pub ceiling_ramp_ms: u64,
    pub precision_threshold: f64,
    /// Relative band around the threshold; `0` is a strict switch.
    pub precision_hysteresis: f64,
    pub fractal: FractalKind,
    pub animation: AnimationTuning,
    pub scenes: SceneTable,
}

impl ExplorerConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&text)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::Invalid(format!(
                "frame must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }

        if self.iteration_ceiling == 0 {
            return Err(ConfigError::Invalid(
                "iteration_ceiling must be greater than zero".to_owned(),
            ));
        }

        if !self.precision_threshold.is_finite() || self.precision_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "precision_threshold must be positive, got {}",
                self.precision_threshold
            )));
        }

        if !(0.0..1.0).contains(&self.precision_hysteresis) {
            return Err(ConfigError::Invalid(format!(
                "precision_hysteresis must be in [0, 1), got {}",
                self.precision_hysteresis
            )));
        }

        self.animation.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn ceiling_ramp(&self) -> Duration {
        Duration::from_millis(self.ceiling_ramp_ms)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            iteration_ceiling: 2000,
            ceiling_ramp_ms: 1500,
            precision_threshold: DEFAULT_PRECISION_THRESHOLD,
            precision_hysteresis: 0.0,
            fractal: FractalKind::Mandelbrot,
            animation: AnimationTuning::default(),
            scenes: SceneTable::reference(),
        }
    }
}
