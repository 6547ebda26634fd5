use crate::core::actions::evaluate_frame::ports::pixel_kernel::PixelKernel;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::split_complex::SplitComplex;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::errors::KernelError;
use crate::core::fractals::escape_time::{evaluate_extended, evaluate_standard};
use crate::core::fractals::frame_contract::FrameContract;
use crate::core::fractals::precision::PrecisionMode;

/// Escape-time kernel for one [`FrameContract`].
///
/// In extended precision the per-pixel offset is added to the split center
/// in double-double, so pixels stay distinct after the offset drops below
/// the `f64` spacing of the center coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameKernel {
    contract: FrameContract,
    viewport: Viewport,
}

impl FrameKernel {
    pub fn new(contract: FrameContract) -> Result<Self, KernelError> {
        if contract.max_iterations == 0 {
            return Err(KernelError::ZeroMaxIterations);
        }

        let viewport = Viewport::new(contract.pose())?;

        Ok(Self { contract, viewport })
    }

    #[must_use]
    pub fn contract(&self) -> &FrameContract {
        &self.contract
    }

    fn pixel_offset(&self, pixel: Point) -> Result<Complex, KernelError> {
        let frame = self.contract.pixel_rect;
        if !frame.contains_point(pixel) {
            return Err(KernelError::PointOutsideFrame { pixel });
        }

        let (x, y) = frame.relative(pixel);
        Ok(self.viewport.screen_offset(x, y, frame))
    }
}

impl PixelKernel for FrameKernel {
    type Success = u32;
    type Failure = KernelError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let offset = self.pixel_offset(pixel)?;
        let FrameContract {
            max_iterations,
            fractal,
            ..
        } = self.contract;

        Ok(match self.contract.precision {
            PrecisionMode::Standard => {
                evaluate_standard(self.contract.center + offset, max_iterations, fractal)
            }
            PrecisionMode::Extended => evaluate_extended(
                SplitComplex::offset(self.contract.center_high, offset),
                max_iterations,
                fractal,
            ),
        })
    }

    fn pixel_rect(&self) -> PixelRect {
        self.contract.pixel_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::viewport::CameraPose;
    use crate::core::fractals::escape_time::evaluate;
    use crate::core::fractals::fractal_kind::FractalKind;

    fn contract(pose: CameraPose, width: u32, height: u32, precision: PrecisionMode) -> FrameContract {
        FrameContract::new(
            &Viewport::new(pose).unwrap(),
            PixelRect::with_size(width, height).unwrap(),
            256,
            precision,
            FractalKind::Mandelbrot,
        )
    }

    #[test]
    fn rejects_zero_max_iterations() {
        let mut contract = contract(CameraPose::default(), 10, 10, PrecisionMode::Standard);
        contract.max_iterations = 0;

        assert_eq!(FrameKernel::new(contract), Err(KernelError::ZeroMaxIterations));
    }

    #[test]
    fn rejects_invalid_pose() {
        let mut contract = contract(CameraPose::default(), 10, 10, PrecisionMode::Standard);
        contract.zoom = -1.0;

        assert!(matches!(FrameKernel::new(contract), Err(KernelError::Viewport(_))));
    }

    #[test]
    fn rejects_pixels_outside_the_frame() {
        let kernel = FrameKernel::new(contract(CameraPose::default(), 10, 10, PrecisionMode::Standard)).unwrap();

        assert_eq!(
            kernel.compute(Point::new(10, 0)),
            Err(KernelError::PointOutsideFrame { pixel: Point::new(10, 0) })
        );
    }

    #[test]
    fn center_pixel_samples_the_camera_center() {
        let pose = CameraPose::new(-1.5, 0.0, 1.35);
        let kernel = FrameKernel::new(contract(pose, 40, 30, PrecisionMode::Standard)).unwrap();

        let expected = evaluate(pose.center, 256, PrecisionMode::Standard, FractalKind::Mandelbrot);

        assert_eq!(kernel.compute(Point::new(20, 15)).unwrap(), expected);
    }

    #[test]
    fn left_edge_at_unit_zoom_is_minus_two() {
        // Pixel (0, h/2) maps to c = -2, which never escapes.
        let kernel = FrameKernel::new(contract(CameraPose::default(), 40, 40, PrecisionMode::Standard)).unwrap();

        assert_eq!(kernel.compute(Point::new(0, 20)).unwrap(), 256);
    }

    #[test]
    fn precisions_agree_at_shallow_zoom() {
        let pose = CameraPose::new(-0.5, 0.0, 1.0);
        let standard = FrameKernel::new(contract(pose, 32, 24, PrecisionMode::Standard)).unwrap();
        let extended = FrameKernel::new(contract(pose, 32, 24, PrecisionMode::Extended)).unwrap();

        for y in 0..24 {
            for x in 0..32 {
                let pixel = Point::new(x, y);
                let a = standard.compute(pixel).unwrap();
                let b = extended.compute(pixel).unwrap();
                assert!(a.abs_diff(b) <= 1, "pixel=({x}, {y}) standard={a} extended={b}");
            }
        }
    }

    #[test]
    fn extended_offsets_survive_below_center_spacing() {
        let pose = CameraPose::new(-0.6619150588774977, 0.4626763853121446, 1e15);
        let kernel = FrameKernel::new(contract(pose, 100, 100, PrecisionMode::Extended)).unwrap();

        let left = kernel.pixel_offset(Point::new(50, 50)).unwrap();
        let right = kernel.pixel_offset(Point::new(51, 50)).unwrap();

        // Plain f64 addition folds neighbouring pixels onto the same point.
        assert_eq!(pose.center.real + left.real, pose.center.real + right.real);

        let a = SplitComplex::offset(kernel.contract().center_high, left);
        let b = SplitComplex::offset(kernel.contract().center_high, right);
        assert_ne!(a, b);
    }
}
