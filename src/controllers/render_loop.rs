use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::evaluate_frame::evaluate_frame_parallel::{
    EvaluateFrameError, evaluate_frame_parallel_cancelable,
};
use crate::core::actions::shade_field::shade_field::{ShadeFieldError, shade_field_cancelable};
use crate::core::actions::shade_field::ports::intensity_map::IntensityMap;
use crate::core::actions::shade_field::sqrt_ramp::SqrtRamp;
use crate::core::data::grayscale_field::{GrayscaleField, GrayscaleFieldError};
use crate::core::fractals::errors::KernelError;
use crate::core::fractals::frame_contract::FrameContract;
use crate::core::fractals::frame_kernel::FrameKernel;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Superseded by a newer frame; drop silently.
    #[error("frame cancelled")]
    Cancelled,

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Field(#[from] GrayscaleFieldError),
}

impl RenderError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<EvaluateFrameError<KernelError>> for RenderError {
    fn from(err: EvaluateFrameError<KernelError>) -> Self {
        match err {
            EvaluateFrameError::Cancelled(_) => Self::Cancelled,
            EvaluateFrameError::Kernel(err) => Self::Kernel(err),
        }
    }
}

impl From<ShadeFieldError> for RenderError {
    fn from(err: ShadeFieldError) -> Self {
        match err {
            ShadeFieldError::Cancelled(_) => Self::Cancelled,
            ShadeFieldError::Field(err) => Self::Field(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub contract: FrameContract,
    pub iterations: Vec<u32>,
    pub field: GrayscaleField,
    pub elapsed: Duration,
}

pub fn render_frame(contract: &FrameContract) -> Result<RenderedFrame, RenderError> {
    render_frame_cancelable(contract, &NeverCancel)
}

/// Evaluates every pixel of `contract` in parallel and shades the result.
pub fn render_frame_cancelable<C: CancelToken>(
    contract: &FrameContract,
    cancel: &C,
) -> Result<RenderedFrame, RenderError> {
    let start = Instant::now();
    let kernel = FrameKernel::new(*contract)?;

    let iterations = evaluate_frame_parallel_cancelable(&kernel, cancel)
        .inspect_err(|err| debug!(%err, "frame evaluation stopped"))?;
    let ramp = SqrtRamp::new(contract.max_iterations);
    let field = shade_field_cancelable(&iterations, &ramp, contract.pixel_rect, cancel)?;

    let elapsed = start.elapsed();
    info!(
        width = contract.pixel_rect.width(),
        height = contract.pixel_rect.height(),
        zoom = contract.zoom,
        max_iterations = contract.max_iterations,
        precision = ?contract.precision,
        fractal = contract.fractal.display_name(),
        shading = ramp.display_name(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "frame rendered"
    );

    Ok(RenderedFrame {
        contract: *contract,
        iterations,
        field,
        elapsed,
    })
}
