use crate::core::actions::shade_field::ports::intensity_map::IntensityMap;

/// Square-root grey ramp: bounded points are black, fast escapes dark and
/// slow escapes bright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqrtRamp {
    max_iterations: u32,
}

impl SqrtRamp {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl IntensityMap<u32> for SqrtRamp {
    fn intensity(&self, iterations: u32) -> u8 {
        if iterations >= self.max_iterations {
            return 0;
        }

        let t = f64::from(iterations) / f64::from(self.max_iterations);
        (255.0 * t.sqrt()).floor() as u8
    }

    fn display_name(&self) -> &str {
        "Square-root ramp"
    }
}
