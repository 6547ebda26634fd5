use crate::core::data::point::Point;
use crate::core::data::viewport::ViewportError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,

    #[error("pixel at x:{}, y:{} is outside the frame", .pixel.x, .pixel.y)]
    PointOutsideFrame { pixel: Point },

    #[error(transparent)]
    Viewport(#[from] ViewportError),
}
