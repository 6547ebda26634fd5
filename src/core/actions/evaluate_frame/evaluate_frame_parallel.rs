use rayon::prelude::*;

use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled, NeverCancel,
};
use crate::core::actions::evaluate_frame::ports::pixel_kernel::PixelKernel;
use crate::core::data::point::Point;

/// Error type for cancelable frame evaluation.
///
/// Cancellation is expected control flow when a newer frame supersedes this
/// one; callers should drop the frame rather than report it.
#[derive(Debug)]
pub enum EvaluateFrameError<E> {
    Cancelled(Cancelled),
    Kernel(E),
}

impl<E: std::fmt::Display> std::fmt::Display for EvaluateFrameError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluateFrameError::Cancelled(c) => write!(f, "{}", c),
            EvaluateFrameError::Kernel(e) => write!(f, "kernel error: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for EvaluateFrameError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvaluateFrameError::Cancelled(c) => Some(c),
            EvaluateFrameError::Kernel(e) => Some(e),
        }
    }
}

/// Evaluates every pixel of the kernel's frame on rayon's pool.
///
/// Output is row-major, identical to [`evaluate_frame_serial`].
///
/// [`evaluate_frame_serial`]: crate::core::actions::evaluate_frame::evaluate_frame_serial::evaluate_frame_serial
pub fn evaluate_frame_parallel<K>(kernel: &K) -> Result<Vec<K::Success>, K::Failure>
where
    K: PixelKernel + Sync,
    K::Success: Send,
    K::Failure: Send,
{
    evaluate_frame_parallel_cancelable(kernel, &NeverCancel).map_err(|e| match e {
        EvaluateFrameError::Kernel(kernel_err) => kernel_err,
        EvaluateFrameError::Cancelled(_) => {
            unreachable!("NeverCancel token should never signal cancellation")
        }
    })
}

/// Parallel evaluation that polls `cancel` at the start of each row and
/// every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels within a row.
pub fn evaluate_frame_parallel_cancelable<K, C>(
    kernel: &K,
    cancel: &C,
) -> Result<Vec<K::Success>, EvaluateFrameError<K::Failure>>
where
    K: PixelKernel + Sync,
    K::Success: Send,
    K::Failure: Send,
    C: CancelToken,
{
    let pixel_rect = kernel.pixel_rect();
    let x_start = pixel_rect.top_left().x;
    let x_end = pixel_rect.bottom_right().x;
    let row_width = pixel_rect.width() as usize;

    let rows: Result<Vec<Vec<K::Success>>, EvaluateFrameError<K::Failure>> =
        (pixel_rect.top_left().y..=pixel_rect.bottom_right().y)
            .into_par_iter()
            .map(|y| {
                let mut row = Vec::with_capacity(row_width);

                for (i, x) in (x_start..=x_end).enumerate() {
                    if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                        return Err(EvaluateFrameError::Cancelled(Cancelled));
                    }

                    let result = kernel
                        .compute(Point { x, y })
                        .map_err(EvaluateFrameError::Kernel)?;
                    row.push(result);
                }

                Ok(row)
            })
            .collect();

    rows.map(|r| r.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::FrameGeneration;
    use crate::core::actions::evaluate_frame::evaluate_frame_serial::evaluate_frame_serial;
    use crate::core::data::pixel_rect::PixelRect;
    use std::error::Error;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl std::fmt::Display for StubError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    #[derive(Debug)]
    struct StubSuccessKernel {
        pixel_rect: PixelRect,
    }

    impl PixelKernel for StubSuccessKernel {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x * 1000 + pixel.y) as u64)
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    #[derive(Debug)]
    struct StubFailureKernel {
        pixel_rect: PixelRect,
    }

    impl PixelKernel for StubFailureKernel {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            Err(StubError {})
        }

        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }
    }

    fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> PixelRect {
        PixelRect::new(Point { x: x1, y: y1 }, Point { x: x2, y: y2 }).unwrap()
    }

    #[test]
    fn test_parallel_matches_serial() {
        for pixel_rect in [rect(0, 0, 10, 8), rect(5, 5, 6, 6), rect(-20, -3, 100, 100)] {
            let kernel = StubSuccessKernel { pixel_rect };

            let serial = evaluate_frame_serial(&kernel).unwrap();
            let parallel = evaluate_frame_parallel(&kernel).unwrap();

            assert_eq!(parallel, serial);
        }
    }

    #[test]
    fn test_parallel_propagates_kernel_failure() {
        let kernel = StubFailureKernel {
            pixel_rect: rect(0, 0, 3, 4),
        };

        assert_eq!(evaluate_frame_parallel(&kernel), Err(StubError {}));
        assert!(matches!(
            evaluate_frame_parallel_cancelable(&kernel, &NeverCancel),
            Err(EvaluateFrameError::Kernel(_))
        ));
    }

    #[test]
    fn test_cancelable_returns_cancelled_when_token_is_cancelled() {
        let kernel = StubSuccessKernel {
            pixel_rect: rect(0, 0, 10, 8),
        };
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = evaluate_frame_parallel_cancelable(&kernel, &cancel_token);

        assert!(matches!(result, Err(EvaluateFrameError::Cancelled(_))));
    }

    #[test]
    fn test_superseded_frame_is_cancelled() {
        let kernel = StubSuccessKernel {
            pixel_rect: rect(0, 0, 10, 8),
        };
        let generation = FrameGeneration::new();
        let stale = generation.begin();
        let fresh = generation.begin();

        assert!(matches!(
            evaluate_frame_parallel_cancelable(&kernel, &stale),
            Err(EvaluateFrameError::Cancelled(_))
        ));
        assert!(evaluate_frame_parallel_cancelable(&kernel, &fresh).is_ok());
    }

    #[test]
    fn test_cancellation_polled_at_row_start() {
        let kernel = StubSuccessKernel {
            pixel_rect: rect(0, 0, 1, 4),
        };
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        assert!(evaluate_frame_parallel_cancelable(&kernel, &cancel_token).is_ok());

        let polls = poll_count.load(Ordering::Relaxed);
        assert!(polls >= 5, "Expected at least 5 polls for 5 rows, got {}", polls);
    }

    #[test]
    fn test_cancellation_polled_multiple_times_on_wide_rows() {
        let kernel = StubSuccessKernel {
            pixel_rect: rect(0, 0, 2999, 1),
        };
        let poll_count = AtomicUsize::new(0);
        let cancel_token = || {
            poll_count.fetch_add(1, Ordering::Relaxed);
            false
        };

        assert!(evaluate_frame_parallel_cancelable(&kernel, &cancel_token).is_ok());

        let polls = poll_count.load(Ordering::Relaxed);
        assert!(polls >= 6, "Expected at least 6 polls for 2 wide rows, got {}", polls);
    }

    #[test]
    fn test_error_display() {
        let cancelled: EvaluateFrameError<StubError> = EvaluateFrameError::Cancelled(Cancelled);
        let kernel: EvaluateFrameError<StubError> = EvaluateFrameError::Kernel(StubError {});

        assert_eq!(cancelled.to_string(), "operation cancelled");
        assert_eq!(kernel.to_string(), "kernel error: StubError");
    }
}
