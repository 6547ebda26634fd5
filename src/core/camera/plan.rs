//! The single in-flight camera animation.
//!
//! A plan animates one [`Phase`] at a time from `start` to `target`. The
//! transition function in [`crate::core::camera::transition`] replaces it
//! with the plan for the next phase when the current one completes.

use crate::core::camera::status::AnimatorState;
use crate::core::camera::tuning::AnimationTuning;
use crate::core::data::viewport::CameraPose;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Zoom back to the baseline at the current center.
    Reset,
    Position,
    Zoom,
}

/// Order of the two travel phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseOrder {
    /// Zooming in: travel first, then zoom.
    PositionFirst,
    /// Zooming out: zoom first, then travel.
    ZoomFirst,
}

impl PhaseOrder {
    #[must_use]
    pub fn for_zooms(current: f64, target: f64) -> Self {
        if target < current {
            Self::ZoomFirst
        } else {
            Self::PositionFirst
        }
    }

    #[must_use]
    pub const fn first(self) -> Phase {
        match self {
            Self::PositionFirst => Phase::Position,
            Self::ZoomFirst => Phase::Zoom,
        }
    }

    #[must_use]
    pub const fn second(self) -> Phase {
        match self {
            Self::PositionFirst => Phase::Zoom,
            Self::ZoomFirst => Phase::Position,
        }
    }
}

/// Where a navigation request is going and how long the trip should take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTarget {
    pub pose: CameraPose,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan {
    pub start: CameraPose,
    pub target: CameraPose,
    pub phase: Phase,
    pub order: PhaseOrder,
    pub start_time: Duration,
    pub phase_duration: Duration,
    /// The request waiting behind a reset.
    pub original_target: Option<NavigationTarget>,
}

impl AnimationPlan {
    /// A two-phase trip; the requested duration is split evenly.
    #[must_use]
    pub fn navigation(
        start: CameraPose,
        target: NavigationTarget,
        order: PhaseOrder,
        start_time: Duration,
    ) -> Self {
        Self {
            start,
            target: target.pose,
            phase: order.first(),
            order,
            start_time,
            phase_duration: target.duration / 2,
            original_target: None,
        }
    }

    /// Zoom back to the baseline at `start.center`, holding `target` for later.
    #[must_use]
    pub fn reset(
        start: CameraPose,
        target: NavigationTarget,
        order: PhaseOrder,
        start_time: Duration,
        tuning: &AnimationTuning,
    ) -> Self {
        Self {
            start,
            target: CameraPose {
                center: start.center,
                zoom: tuning.baseline_zoom,
            },
            phase: Phase::Reset,
            order,
            start_time,
            phase_duration: tuning.reset_duration(),
            original_target: Some(target),
        }
    }

    #[must_use]
    pub fn needs_reset(&self) -> bool {
        self.original_target.is_some()
    }

    #[must_use]
    pub fn state(&self) -> AnimatorState {
        match self.phase {
            Phase::Reset => AnimatorState::Resetting,
            Phase::Position => AnimatorState::MovingPosition,
            Phase::Zoom => AnimatorState::MovingZoom,
        }
    }

    /// Linear progress of the current phase in `[0, 1]`.
    ///
    /// Before `start_time` the phase has not begun. A zero-length phase is
    /// complete as soon as it has started.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        let Some(elapsed) = now.checked_sub(self.start_time) else {
            return 0.0;
        };

        if self.phase_duration.is_zero() {
            return 1.0;
        }

        (elapsed.as_secs_f64() / self.phase_duration.as_secs_f64()).min(1.0)
    }

    /// Camera pose at eased progress `eased` of the current phase.
    #[must_use]
    pub fn pose_at(&self, eased: f64, log_space_ratio: f64) -> CameraPose {
        match self.phase {
            Phase::Reset | Phase::Zoom => CameraPose {
                center: self.start.center,
                zoom: interpolate_zoom(self.start.zoom, self.target.zoom, eased, log_space_ratio),
            },
            Phase::Position => CameraPose {
                center: self.start.center.lerp(self.target.center, eased),
                zoom: self.start.zoom,
            },
        }
    }

    /// Exact pose at the end of the current phase.
    #[must_use]
    pub fn completed_pose(&self) -> CameraPose {
        match self.phase {
            Phase::Reset | Phase::Zoom => CameraPose {
                center: self.start.center,
                zoom: self.target.zoom,
            },
            Phase::Position => CameraPose {
                center: self.target.center,
                zoom: self.start.zoom,
            },
        }
    }
}

/// Geometric zoom interpolation.
///
/// Large ratios are interpolated as `exp(lerp(ln start, ln target, t))`,
/// others as `start * ratio^t`.
#[must_use]
pub fn interpolate_zoom(start: f64, target: f64, t: f64, log_space_ratio: f64) -> f64 {
    let ratio = target / start;

    if ratio > log_space_ratio || ratio < log_space_ratio.recip() {
        let (from, to) = (start.ln(), target.ln());
        (from + (to - from) * t).exp()
    } else {
        start * ratio.powf(t)
    }
}
