pub mod animator;
pub mod easing;
pub mod plan;
pub mod status;
pub mod transition;
pub mod tuning;

pub use animator::CameraAnimator;
pub use plan::{AnimationPlan, NavigationTarget, Phase, PhaseOrder};
pub use status::{AnimationEvent, AnimationFrame, AnimatorState};
pub use transition::{StepOutcome, step_plan};
pub use tuning::{AnimationTuning, TuningError};
