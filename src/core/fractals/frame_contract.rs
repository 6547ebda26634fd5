use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::split_complex::SplitComplex;
use crate::core::data::viewport::{CameraPose, Viewport};
use crate::core::fractals::fractal_kind::FractalKind;
use crate::core::fractals::precision::PrecisionMode;

/// Everything a pixel kernel needs to reproduce one frame exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContract {
    pub pixel_rect: PixelRect,
    pub center: Complex,
    /// `center` split into double-double form once per frame.
    pub center_high: SplitComplex,
    pub zoom: f64,
    pub max_iterations: u32,
    pub precision: PrecisionMode,
    pub fractal: FractalKind,
}

impl FrameContract {
    #[must_use]
    pub fn new(
        viewport: &Viewport,
        pixel_rect: PixelRect,
        max_iterations: u32,
        precision: PrecisionMode,
        fractal: FractalKind,
    ) -> Self {
        Self {
            pixel_rect,
            center: viewport.center(),
            center_high: SplitComplex::split(viewport.center()),
            zoom: viewport.zoom(),
            max_iterations,
            precision,
            fractal,
        }
    }

    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            center: self.center,
            zoom: self.zoom,
        }
    }

    #[must_use]
    pub fn uses_extended_precision(&self) -> bool {
        self.precision.is_extended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_copies_viewport_and_splits_center() {
        let viewport = Viewport::new(CameraPose::new(-0.6619150588774977, 0.4626763853121446, 6252.9)).unwrap();
        let rect = PixelRect::with_size(64, 48).unwrap();

        let contract = FrameContract::new(
            &viewport,
            rect,
            1200,
            PrecisionMode::Extended,
            FractalKind::Mandelbrot,
        );

        assert_eq!(contract.pose(), viewport.pose());
        assert_eq!(contract.center_high.to_complex(), viewport.center());
        assert!(contract.uses_extended_precision());
        assert_eq!(contract.pixel_rect.pixel_count(), 64 * 48);
    }
}
