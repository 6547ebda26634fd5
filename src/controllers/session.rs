//! The running exploration session.
//!
//! [`ExplorerSession`] is the single owner of the camera (the
//! [`Viewport`]) and of the in-flight animation. Input handlers and the frame
//! scheduler only ever touch them through its methods. All methods take the
//! current time as an offset from the session's epoch.

use crate::config::ExplorerConfig;
use crate::core::budget::{CeilingRamp, budget};
use crate::core::camera::animator::CameraAnimator;
use crate::core::camera::status::{AnimationFrame, AnimatorState};
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::scene::{SceneCoordinate, SceneError, SceneTable};
use crate::core::data::viewport::{CameraPose, Viewport, ViewportError, clamp_zoom};
use crate::core::fractals::fractal_kind::FractalKind;
use crate::core::fractals::frame_contract::FrameContract;
use crate::core::fractals::precision::PrecisionSelector;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Viewport(#[from] ViewportError),

    #[error(transparent)]
    PixelRect(#[from] PixelRectError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    In,
    Out,
}

#[derive(Debug, Clone)]
pub struct ExplorerSession {
    viewport: Viewport,
    animator: CameraAnimator,
    scenes: SceneTable,
    fractal: FractalKind,
    frame: PixelRect,
    precision: PrecisionSelector,
    ceiling_ramp: CeilingRamp,
    last_frame: Option<AnimationFrame>,
}

impl ExplorerSession {
    pub fn new(config: &ExplorerConfig) -> Result<Self, SessionError> {
        Ok(Self {
            viewport: Viewport::default(),
            animator: CameraAnimator::new(config.animation),
            scenes: config.scenes.clone(),
            fractal: config.fractal,
            frame: PixelRect::with_size(config.width, config.height)?,
            precision: PrecisionSelector::new(
                config.precision_threshold,
                config.precision_hysteresis,
            ),
            ceiling_ramp: CeilingRamp::new(config.iteration_ceiling, config.ceiling_ramp()),
            last_frame: None,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.viewport.pose()
    }

    #[must_use]
    pub fn frame(&self) -> PixelRect {
        self.frame
    }

    #[must_use]
    pub fn fractal(&self) -> FractalKind {
        self.fractal
    }

    #[must_use]
    pub fn scenes(&self) -> &SceneTable {
        &self.scenes
    }

    #[must_use]
    pub fn animator_state(&self) -> AnimatorState {
        self.animator.state()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// The animator output of the most recent [`tick`](Self::tick), if any.
    #[must_use]
    pub fn last_animation_frame(&self) -> Option<&AnimationFrame> {
        self.last_frame.as_ref()
    }

    /// Replaces the ceiling ramp, e.g. to render at a fixed budget.
    pub fn set_ceiling_ramp(&mut self, ramp: CeilingRamp) {
        self.ceiling_ramp = ramp;
    }

    /// Starts an animated trip to a named scene.
    ///
    /// An unknown name is reported and leaves the session untouched, including
    /// any animation already running.
    pub fn navigate_to_scene(
        &mut self,
        name: &str,
        duration: Option<Duration>,
        now: Duration,
    ) -> Result<AnimatorState, SessionError> {
        let pose = match self.scenes.find(name) {
            Ok(scene) => scene.pose(),
            Err(err) => {
                warn!(scene = name, "navigation to unknown scene ignored");
                return Err(err.into());
            }
        };

        info!(scene = name, "navigating to scene");
        self.navigate_to(pose, duration, now)
    }

    /// Starts an animated trip to `target`. `None` uses the tuned default
    /// duration.
    pub fn navigate_to(
        &mut self,
        target: CameraPose,
        duration: Option<Duration>,
        now: Duration,
    ) -> Result<AnimatorState, SessionError> {
        if let Err(err) = target.validate() {
            warn!(%err, "navigation target rejected");
            return Err(err.into());
        }

        let zoom = clamp_zoom(target.zoom);
        if zoom != target.zoom {
            warn!(requested = target.zoom, clamped = zoom, "navigation zoom clamped");
        }

        let duration = duration.unwrap_or_else(|| self.animator.tuning().default_duration());
        let target = CameraPose { zoom, ..target };

        Ok(self
            .animator
            .request(self.viewport.pose(), target, duration, now))
    }

    /// Places the camera at `pose` without animating. Cancels any animation.
    pub fn jump_to(&mut self, pose: CameraPose) -> Result<(), ViewportError> {
        self.animator.cancel();

        if let Err(err) = pose.validate() {
            warn!(%err, "jump rejected");
            return Err(err);
        }

        let zoom = clamp_zoom(pose.zoom);
        if zoom != pose.zoom {
            warn!(requested = pose.zoom, clamped = zoom, "jump zoom clamped");
        }

        self.viewport.set_pose(CameraPose { zoom, ..pose })
    }

    /// Drags the view by `(dx, dy)` pixels. Cancels any animation.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<(), ViewportError> {
        self.animator.cancel();

        self.viewport
            .pan_by_pixels(dx, dy, self.frame)
            .inspect_err(|err| warn!(%err, dx, dy, "pan rejected"))
    }

    /// One wheel notch about the cursor at `(x, y)`. Cancels any animation.
    ///
    /// Returns the zoom factor actually applied after clamping.
    pub fn wheel_zoom(
        &mut self,
        x: f64,
        y: f64,
        direction: WheelDirection,
    ) -> Result<f64, ViewportError> {
        self.animator.cancel();

        let step = self.animator.tuning().wheel_zoom_factor;
        let factor = match direction {
            WheelDirection::In => step,
            WheelDirection::Out => step.recip(),
        };

        let applied = self
            .viewport
            .zoom_about(x, y, factor, self.frame)
            .inspect_err(|err| warn!(%err, x, y, "wheel zoom rejected"))?;

        if applied != factor {
            warn!(requested = factor, applied, zoom = self.viewport.zoom(), "wheel zoom clamped");
        }

        Ok(applied)
    }

    /// Back to `center (0, 0)`, zoom 1. Cancels any animation.
    pub fn reset_view(&mut self) {
        self.animator.cancel();
        self.viewport = Viewport::default();
        debug!("view reset");
    }

    /// Switches fractal family and resets the view.
    pub fn set_fractal(&mut self, fractal: FractalKind) {
        info!(fractal = fractal.display_name(), "fractal changed");
        self.fractal = fractal;
        self.reset_view();
    }

    /// Flips between Mandelbrot and the default Julia set.
    pub fn toggle_fractal(&mut self) -> FractalKind {
        let next = match self.fractal {
            FractalKind::Mandelbrot => FractalKind::julia_default(),
            FractalKind::Julia { .. } => FractalKind::Mandelbrot,
        };
        self.set_fractal(next);
        next
    }

    /// Uses the point under `(x, y)` as the Julia constant and shows that
    /// Julia set from the default view.
    pub fn set_julia_constant_at(&mut self, x: f64, y: f64) -> Result<Complex, ViewportError> {
        let constant = self.viewport.screen_to_complex(x, y, self.frame);
        if !constant.is_finite() {
            return Err(ViewportError::NonFinite {
                center: constant,
                zoom: self.viewport.zoom(),
            });
        }

        self.set_fractal(FractalKind::Julia { constant });
        Ok(constant)
    }

    /// Stores the current camera in the scene table under `name`.
    pub fn bookmark_current(&mut self, name: impl Into<String>) -> Result<(), SceneError> {
        let pose = self.viewport.pose();
        let scene = SceneCoordinate::new(name, pose.center.real, pose.center.imag, pose.zoom);

        info!(scene = %scene.name, "bookmark added");
        self.scenes.push(scene)
    }

    /// Advances the animation to `now` and returns the contract for the
    /// frame to draw.
    pub fn tick(&mut self, now: Duration) -> FrameContract {
        self.last_frame = self.animator.step(now);

        if let Some(frame) = &self.last_frame {
            if let Err(err) = self.viewport.set_pose(frame.pose) {
                warn!(%err, "animation produced an invalid pose; cancelling");
                self.animator.cancel();
            }
        }

        let zoom = self.viewport.zoom();
        let ceiling = self.ceiling_ramp.ceiling_at(now);
        let max_iterations = budget(zoom, ceiling).max(1);
        let precision = self.precision.select(zoom);

        FrameContract::new(&self.viewport, self.frame, max_iterations, precision, self.fractal)
    }
}
