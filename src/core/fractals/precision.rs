use serde::{Deserialize, Serialize};
use tracing::debug;

/// Zoom above which frames switch to double-double evaluation.
pub const DEFAULT_PRECISION_THRESHOLD: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionMode {
    #[default]
    Standard,
    Extended,
}

impl PrecisionMode {
    #[must_use]
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }
}

/// Strict threshold rule: extended precision strictly above `threshold`.
#[must_use]
pub fn select_precision(zoom: f64, threshold: f64) -> PrecisionMode {
    if zoom > threshold {
        PrecisionMode::Extended
    } else {
        PrecisionMode::Standard
    }
}

/// Picks one precision mode per frame, optionally with a hysteresis band.
///
/// `hysteresis` is relative to the threshold: with threshold `1000` and
/// hysteresis `0.1`, extended precision switches on above `1100` and off
/// again at or below `900`. A hysteresis of zero is the strict rule of
/// [`select_precision`]. The first frame always uses the strict rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionSelector {
    threshold: f64,
    hysteresis: f64,
    current: Option<PrecisionMode>,
}

impl PrecisionSelector {
    #[must_use]
    pub fn new(threshold: f64, hysteresis: f64) -> Self {
        Self {
            threshold,
            hysteresis: if hysteresis.is_finite() { hysteresis.max(0.0) } else { 0.0 },
            current: None,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn current(&self) -> Option<PrecisionMode> {
        self.current
    }

    pub fn select(&mut self, zoom: f64) -> PrecisionMode {
        let band = self.threshold * self.hysteresis;

        let next = match self.current {
            None => select_precision(zoom, self.threshold),
            Some(PrecisionMode::Standard) => select_precision(zoom, self.threshold + band),
            Some(PrecisionMode::Extended) => select_precision(zoom, self.threshold - band),
        };

        match self.current {
            Some(previous) if previous != next => {
                debug!(?previous, ?next, zoom, "precision mode switched");
            }
            _ => {}
        }

        self.current = Some(next);
        next
    }
}

impl Default for PrecisionSelector {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION_THRESHOLD, 0.0)
    }
}
