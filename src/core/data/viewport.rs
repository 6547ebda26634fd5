//! Camera state and the screen ⇄ complex-plane transform.
//!
//! At zoom `z` the frame spans [`BASE_WIDTH`]` / z` units horizontally,
//! centred on [`Viewport::center`]. Pixels are square, so the vertical span
//! follows the frame's aspect ratio. Screen `y` grows downwards while the
//! imaginary axis grows upwards.

use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the visible window at zoom 1.
pub const BASE_WIDTH: f64 = 4.0;
pub const MIN_ZOOM: f64 = 1e-6;
/// Upper bound keeping `BASE_WIDTH / zoom` a normal `f64`.
pub const MAX_ZOOM: f64 = 1e300;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("camera pose must be finite: center {center}, zoom {zoom}")]
    NonFinite { center: Complex, zoom: f64 },

    #[error("zoom must be positive, got {zoom}")]
    NonPositiveZoom { zoom: f64 },
}

/// A camera position: where it looks and how far it is zoomed in.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub center: Complex,
    pub zoom: f64,
}

impl CameraPose {
    #[must_use]
    pub const fn new(center_x: f64, center_y: f64, zoom: f64) -> Self {
        Self {
            center: Complex::new(center_x, center_y),
            zoom,
        }
    }

    pub fn validate(&self) -> Result<(), ViewportError> {
        if !self.center.is_finite() || !self.zoom.is_finite() {
            return Err(ViewportError::NonFinite {
                center: self.center,
                zoom: self.zoom,
            });
        }

        if self.zoom <= 0.0 {
            return Err(ViewportError::NonPositiveZoom { zoom: self.zoom });
        }

        Ok(())
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center: Complex,
    zoom: f64,
}

impl Viewport {
    /// Builds a viewport, clamping zoom into `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn new(pose: CameraPose) -> Result<Self, ViewportError> {
        pose.validate()?;

        Ok(Self {
            center: pose.center,
            zoom: clamp_zoom(pose.zoom),
        })
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            center: self.center,
            zoom: self.zoom,
        }
    }

    /// Replaces the pose. Invalid poses leave the viewport untouched.
    pub fn set_pose(&mut self, pose: CameraPose) -> Result<(), ViewportError> {
        *self = Self::new(pose)?;
        Ok(())
    }

    /// Complex-plane width of one pixel of `frame`.
    #[must_use]
    pub fn units_per_pixel(&self, frame: PixelRect) -> f64 {
        BASE_WIDTH / (self.zoom * f64::from(frame.width()))
    }

    #[must_use]
    pub fn visible_width(&self) -> f64 {
        BASE_WIDTH / self.zoom
    }

    /// Displacement from the center to the screen position `(x, y)`,
    /// measured in frame-relative pixels.
    #[must_use]
    pub fn screen_offset(&self, x: f64, y: f64, frame: PixelRect) -> Complex {
        let scale = self.units_per_pixel(frame);
        let half_width = f64::from(frame.width()) / 2.0;
        let half_height = f64::from(frame.height()) / 2.0;

        Complex {
            real: (x - half_width) * scale,
            imag: -(y - half_height) * scale,
        }
    }

    #[must_use]
    pub fn screen_to_complex(&self, x: f64, y: f64, frame: PixelRect) -> Complex {
        self.center + self.screen_offset(x, y, frame)
    }

    #[must_use]
    pub fn complex_to_screen(&self, point: Complex, frame: PixelRect) -> (f64, f64) {
        let scale = self.units_per_pixel(frame);
        let delta = point - self.center;

        (
            delta.real / scale + f64::from(frame.width()) / 2.0,
            f64::from(frame.height()) / 2.0 - delta.imag / scale,
        )
    }

    /// Moves the camera so that content follows a drag of `(dx, dy)` pixels.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64, frame: PixelRect) -> Result<(), ViewportError> {
        let scale = self.units_per_pixel(frame);
        let center = Complex {
            real: self.center.real - dx * scale,
            imag: self.center.imag + dy * scale,
        };

        self.set_pose(CameraPose {
            center,
            zoom: self.zoom,
        })
    }

    /// Multiplies zoom by `factor` keeping the complex point under `(x, y)`
    /// fixed on screen. Returns the factor actually applied after clamping.
    pub fn zoom_about(
        &mut self,
        x: f64,
        y: f64,
        factor: f64,
        frame: PixelRect,
    ) -> Result<f64, ViewportError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ViewportError::NonPositiveZoom {
                zoom: self.zoom * factor,
            });
        }

        let anchor = self.screen_to_complex(x, y, frame);
        let zoom = clamp_zoom(self.zoom * factor);
        let applied = zoom / self.zoom;
        let center = anchor - (anchor - self.center).scale(applied.recip());

        self.set_pose(CameraPose { center, zoom })?;

        Ok(applied)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Complex::ZERO,
            zoom: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;

    const EPSILON: f64 = 1e-12;

    fn frame(width: i32, height: i32) -> PixelRect {
        PixelRect::new(Point { x: 0, y: 0 }, Point { x: width - 1, y: height - 1 }).unwrap()
    }

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "actual={} expected={}",
            actual,
            expected
        );
    }

    #[test]
    fn unit_zoom_spans_base_width() {
        let viewport = Viewport::default();
        let frame = frame(400, 400);

        let left = viewport.screen_to_complex(0.0, 200.0, frame);
        let right = viewport.screen_to_complex(400.0, 200.0, frame);

        assert_approx_eq(left.real, -2.0);
        assert_approx_eq(right.real, 2.0);
        assert_approx_eq(viewport.visible_width(), BASE_WIDTH);
    }

    #[test]
    fn screen_y_is_inverted_relative_to_imaginary_axis() {
        let viewport = Viewport::default();
        let frame = frame(400, 200);

        let top = viewport.screen_to_complex(200.0, 0.0, frame);
        let bottom = viewport.screen_to_complex(200.0, 200.0, frame);

        assert_approx_eq(top.imag, 1.0);
        assert_approx_eq(bottom.imag, -1.0);
    }

    #[test]
    fn complex_to_screen_inverts_screen_to_complex() {
        let viewport = Viewport::new(CameraPose::new(-0.66, 0.46, 6252.9)).unwrap();
        let frame = frame(640, 480);

        let point = viewport.screen_to_complex(123.0, 456.0, frame);
        let (x, y) = viewport.complex_to_screen(point, frame);

        assert!((x - 123.0).abs() < 1e-6);
        assert!((y - 456.0).abs() < 1e-6);
    }

    #[test]
    fn new_rejects_non_finite_and_non_positive_poses() {
        assert!(matches!(
            Viewport::new(CameraPose::new(f64::NAN, 0.0, 1.0)),
            Err(ViewportError::NonFinite { .. })
        ));
        assert_eq!(
            Viewport::new(CameraPose::new(0.0, 0.0, 0.0)),
            Err(ViewportError::NonPositiveZoom { zoom: 0.0 })
        );
    }

    #[test]
    fn new_clamps_zoom_into_supported_range() {
        assert_eq!(Viewport::new(CameraPose::new(0.0, 0.0, 1e-9)).unwrap().zoom(), MIN_ZOOM);
        assert_eq!(Viewport::new(CameraPose::new(0.0, 0.0, 1e305)).unwrap().zoom(), MAX_ZOOM);
    }

    #[test]
    fn set_pose_failure_leaves_state_unchanged() {
        let mut viewport = Viewport::new(CameraPose::new(1.0, 2.0, 3.0)).unwrap();

        let result = viewport.set_pose(CameraPose::new(0.0, f64::INFINITY, 1.0));

        assert!(result.is_err());
        assert_eq!(viewport.pose(), CameraPose::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn pan_moves_center_against_drag_direction() {
        let mut viewport = Viewport::default();
        let frame = frame(400, 400);

        viewport.pan_by_pixels(100.0, 50.0, frame).unwrap();

        assert_approx_eq(viewport.center().real, -1.0);
        assert_approx_eq(viewport.center().imag, 0.5);
    }

    #[test]
    fn zoom_about_keeps_cursor_point_fixed() {
        let mut viewport = Viewport::new(CameraPose::new(-0.5, 0.25, 3.0)).unwrap();
        let frame = frame(800, 600);
        let before = viewport.screen_to_complex(610.0, 95.0, frame);

        let applied = viewport.zoom_about(610.0, 95.0, 1.05, frame).unwrap();
        let after = viewport.screen_to_complex(610.0, 95.0, frame);

        assert_approx_eq(applied, 1.05);
        assert_approx_eq(viewport.zoom(), 3.15);
        assert_approx_eq(after.real, before.real);
        assert_approx_eq(after.imag, before.imag);
    }

    #[test]
    fn zoom_about_reports_clamped_factor() {
        let mut viewport = Viewport::new(CameraPose::new(0.0, 0.0, MAX_ZOOM)).unwrap();

        let applied = viewport.zoom_about(10.0, 10.0, 2.0, frame(20, 20)).unwrap();

        assert_eq!(applied, 1.0);
        assert_eq!(viewport.zoom(), MAX_ZOOM);
    }

    #[test]
    fn zoom_about_rejects_invalid_factor() {
        let mut viewport = Viewport::default();

        assert!(viewport.zoom_about(0.0, 0.0, 0.0, frame(20, 20)).is_err());
        assert!(viewport.zoom_about(0.0, 0.0, f64::NAN, frame(20, 20)).is_err());
        assert_eq!(viewport, Viewport::default());
    }
}
