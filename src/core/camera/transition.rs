use crate::core::camera::easing::ease_in_out_cubic;
use crate::core::camera::plan::{AnimationPlan, Phase};
use crate::core::camera::status::AnimationEvent;
use crate::core::camera::tuning::AnimationTuning;
use crate::core::data::viewport::CameraPose;
use std::time::Duration;

/// Outcome of advancing a plan to `now`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub pose: CameraPose,
    /// Plan to keep running; `None` once the camera has settled.
    pub next: Option<AnimationPlan>,
    pub event: Option<AnimationEvent>,
}

/// Pure transition function of the camera state machine.
///
/// An unfinished phase yields the eased pose and the same plan. A finished
/// phase yields its exact end pose and the plan that follows:
///
/// * reset: the held request, starting after the reset pause;
/// * first travel phase: the second phase, starting now from the end pose;
/// * second travel phase: nothing, the camera is on target.
#[must_use]
pub fn step_plan(plan: &AnimationPlan, now: Duration, tuning: &AnimationTuning) -> StepOutcome {
    let progress = plan.progress(now);

    if progress < 1.0 {
        return StepOutcome {
            pose: plan.pose_at(ease_in_out_cubic(progress), tuning.log_space_ratio),
            next: Some(plan.clone()),
            event: None,
        };
    }

    match plan.phase {
        Phase::Reset => complete_reset(plan, now, tuning),
        phase if phase == plan.order.first() => {
            let pose = plan.completed_pose();
            let next = AnimationPlan {
                start: pose,
                phase: plan.order.second(),
                start_time: now,
                ..plan.clone()
            };
            let event = AnimationEvent::PhaseAdvanced {
                from: plan.state(),
                to: next.state(),
            };

            StepOutcome {
                pose,
                next: Some(next),
                event: Some(event),
            }
        }
        _ => StepOutcome {
            pose: plan.target,
            next: None,
            event: Some(AnimationEvent::Settled),
        },
    }
}

fn complete_reset(plan: &AnimationPlan, now: Duration, tuning: &AnimationTuning) -> StepOutcome {
    let pose = plan.target;

    match plan.original_target {
        Some(target) => StepOutcome {
            pose,
            next: Some(AnimationPlan::navigation(
                pose,
                target,
                plan.order,
                now + tuning.reset_pause(),
            )),
            event: Some(AnimationEvent::ResetCompleted),
        },
        None => StepOutcome {
            pose,
            next: None,
            event: Some(AnimationEvent::Settled),
        },
    }
}
