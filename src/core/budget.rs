//! Per-frame iteration budget.
//!
//! The budget grows with `ln(zoom + 1)` in three tiers, each with a floor,
//! and never exceeds the caller's ceiling. The ceiling itself ramps up from
//! 1 over a short startup reveal ([`CeilingRamp`]).

use crate::core::camera::easing::ease_in_out_cubic;
use std::time::Duration;

struct Tier {
    floor: u32,
    scale: f64,
}

const DEEP: Tier = Tier {
    floor: 500,
    scale: 200.0,
};
const MEDIUM: Tier = Tier {
    floor: 300,
    scale: 180.0,
};
const SHALLOW: Tier = Tier {
    floor: 100,
    scale: 150.0,
};

fn tier_for(zoom: f64) -> &'static Tier {
    if zoom > 1e6 {
        &DEEP
    } else if zoom > 1e4 {
        &MEDIUM
    } else {
        &SHALLOW
    }
}

/// Floor of the tier `zoom` falls into.
#[must_use]
pub fn tier_floor(zoom: f64) -> u32 {
    tier_for(zoom).floor
}

/// `min(ceiling, max(floor, floor(ln(zoom + 1) * scale)))` for the tier of `zoom`.
#[must_use]
pub fn budget(zoom: f64, ceiling: u32) -> u32 {
    let tier = tier_for(zoom);
    let formula = ((zoom + 1.0).ln() * tier.scale).floor();

    let formula = if formula.is_finite() && formula > 0.0 {
        formula.min(f64::from(u32::MAX)) as u32
    } else {
        0
    };

    formula.max(tier.floor).min(ceiling)
}

/// Eases the iteration ceiling from 1 to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CeilingRamp {
    target: u32,
    duration: Duration,
}

impl CeilingRamp {
    #[must_use]
    pub fn new(target: u32, duration: Duration) -> Self {
        Self { target, duration }
    }

    /// A ramp that is already complete.
    #[must_use]
    pub fn settled(target: u32) -> Self {
        Self::new(target, Duration::ZERO)
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    #[must_use]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    #[must_use]
    pub fn ceiling_at(&self, elapsed: Duration) -> u32 {
        if self.target <= 1 || self.is_complete(elapsed) {
            return self.target;
        }

        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let span = f64::from(self.target - 1);

        (1.0 + span * ease_in_out_cubic(t)).floor() as u32
    }
}
