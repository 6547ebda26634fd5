use crate::core::actions::evaluate_frame::ports::pixel_kernel::PixelKernel;
use crate::core::data::point::Point;

/// Evaluates every pixel of the kernel's frame on the calling thread,
/// row-major.
pub fn evaluate_frame_serial<K: PixelKernel>(kernel: &K) -> Result<Vec<K::Success>, K::Failure> {
    let pixel_rect = kernel.pixel_rect();
    let mut results = Vec::with_capacity(pixel_rect.pixel_count());

    for y in pixel_rect.top_left().y..=pixel_rect.bottom_right().y {
        for x in pixel_rect.top_left().x..=pixel_rect.bottom_right().x {
            results.push(kernel.compute(Point { x, y })?);
        }
    }

    Ok(results)
}
