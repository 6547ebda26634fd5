use crate::core::camera::plan::{AnimationPlan, NavigationTarget, PhaseOrder};
use crate::core::camera::status::{AnimationFrame, AnimatorState};
use crate::core::camera::transition::step_plan;
use crate::core::camera::tuning::AnimationTuning;
use crate::core::data::viewport::CameraPose;
use std::time::Duration;
use tracing::{debug, info};

// Reset, first phase, second phase, settle.
const MAX_TRANSITIONS_PER_STEP: usize = 4;

/// Owns the single in-flight [`AnimationPlan`].
///
/// Times are offsets from an arbitrary epoch shared by every call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraAnimator {
    tuning: AnimationTuning,
    plan: Option<AnimationPlan>,
}

impl CameraAnimator {
    #[must_use]
    pub fn new(tuning: AnimationTuning) -> Self {
        Self { tuning, plan: None }
    }

    #[must_use]
    pub fn tuning(&self) -> &AnimationTuning {
        &self.tuning
    }

    #[must_use]
    pub fn plan(&self) -> Option<&AnimationPlan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.plan
            .as_ref()
            .map_or(AnimatorState::Idle, AnimationPlan::state)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.plan.is_some()
    }

    /// Starts a trip from `current` to `target`, replacing any running plan.
    ///
    /// Phase order is fixed here from the zoom at request time. Requests
    /// made above the reset threshold zoom back to the baseline first.
    pub fn request(
        &mut self,
        current: CameraPose,
        target: CameraPose,
        duration: Duration,
        now: Duration,
    ) -> AnimatorState {
        let order = PhaseOrder::for_zooms(current.zoom, target.zoom);
        let navigation = NavigationTarget {
            pose: target,
            duration,
        };

        let plan = if current.zoom > self.tuning.reset_zoom_threshold {
            AnimationPlan::reset(current, navigation, order, now, &self.tuning)
        } else {
            AnimationPlan::navigation(current, navigation, order, now)
        };

        info!(
            from = %current.center,
            from_zoom = current.zoom,
            to = %target.center,
            to_zoom = target.zoom,
            duration_ms = duration.as_millis() as u64,
            reset = plan.needs_reset(),
            ?order,
            "navigation requested"
        );

        self.plan = Some(plan);
        self.state()
    }

    /// Drops the running plan. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.plan.take().is_some();
        if cancelled {
            debug!("animation cancelled");
        }
        cancelled
    }

    /// Advances the running plan to `now`.
    ///
    /// Phases that are already complete at `now` (zero durations) are passed
    /// through in the same call. Returns `None` when idle.
    pub fn step(&mut self, now: Duration) -> Option<AnimationFrame> {
        let mut plan = self.plan.take()?;
        let mut events = Vec::new();

        for _ in 0..MAX_TRANSITIONS_PER_STEP {
            let outcome = step_plan(&plan, now, &self.tuning);

            if let Some(event) = outcome.event {
                debug!(?event, zoom = outcome.pose.zoom, "animation transition");
                events.push(event);
            }

            match outcome.next {
                Some(next) if outcome.event.is_some() && next.progress(now) >= 1.0 => {
                    plan = next;
                }
                next => {
                    self.plan = next;
                    return Some(AnimationFrame {
                        pose: outcome.pose,
                        state: self.state(),
                        events,
                    });
                }
            }
        }

        // Unreachable with well-formed plans: each pass moves to a later phase.
        let pose = plan.target;
        Some(AnimationFrame {
            pose,
            state: AnimatorState::Idle,
            events,
        })
    }
}
