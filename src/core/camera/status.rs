use crate::core::data::viewport::CameraPose;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimatorState {
    #[default]
    Idle,
    Resetting,
    MovingPosition,
    MovingZoom,
}

impl fmt::Display for AnimatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Resetting => "resetting",
            Self::MovingPosition => "moving position",
            Self::MovingZoom => "moving zoom",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The reset finished; the original request is scheduled next.
    ResetCompleted,
    /// The first travel phase finished and the second one started.
    PhaseAdvanced {
        from: AnimatorState,
        to: AnimatorState,
    },
    /// The camera reached its target exactly.
    Settled,
}

/// Result of one animator step.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    pub pose: CameraPose,
    pub state: AnimatorState,
    pub events: Vec<AnimationEvent>,
}

impl AnimationFrame {
    #[must_use]
    pub fn settled(&self) -> bool {
        self.events.contains(&AnimationEvent::Settled)
    }
}
