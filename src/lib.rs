pub mod config;
pub mod controllers;
pub mod core;
pub mod presenters;

pub use config::{ConfigError, ExplorerConfig};
pub use controllers::cli::{CameraTarget, CliError};
pub use controllers::frame_clock::{Clock, DriveReport, SimulatedClock, WallClock, drive_until_settled};
pub use controllers::render_loop::{RenderError, RenderedFrame, render_frame, render_frame_cancelable};
pub use controllers::session::{ExplorerSession, SessionError, WheelDirection};
pub use crate::core::camera::{AnimationEvent, AnimationFrame, AnimationTuning, AnimatorState, CameraAnimator};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::scene::{SceneCoordinate, SceneError, SceneTable};
pub use crate::core::data::viewport::{CameraPose, Viewport, ViewportError};
pub use crate::core::fractals::fractal_kind::FractalKind;
pub use crate::core::fractals::frame_contract::FrameContract;
pub use crate::core::fractals::precision::PrecisionMode;
pub use presenters::file::pgm::PgmFilePresenter;
