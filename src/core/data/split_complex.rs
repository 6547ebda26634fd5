use crate::core::data::complex::Complex;
use crate::core::data::split_double::{self, SplitDouble};

/// Complex number with double-double components.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SplitComplex {
    pub real: SplitDouble,
    pub imag: SplitDouble,
}

impl SplitComplex {
    pub const ZERO: Self = Self {
        real: SplitDouble::ZERO,
        imag: SplitDouble::ZERO,
    };

    #[must_use]
    pub const fn new(real: SplitDouble, imag: SplitDouble) -> Self {
        Self { real, imag }
    }

    /// Splits both components of an `f64` complex.
    #[must_use]
    pub fn split(value: Complex) -> Self {
        Self {
            real: split_double::split(value.real),
            imag: split_double::split(value.imag),
        }
    }

    /// `base + offset` evaluated in double-double, so that an offset many
    /// orders of magnitude smaller than `base` is not absorbed.
    #[must_use]
    pub fn offset(base: Self, offset: Complex) -> Self {
        base + Self::split(offset)
    }

    #[must_use]
    pub fn square(self) -> Self {
        Self {
            real: split_double::sqr(self.real) - split_double::sqr(self.imag),
            imag: split_double::mul(self.real, self.imag).twice(),
        }
    }

    /// `sqr(re) + sqr(im)` collapsed to `f64`.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        split_double::add(split_double::sqr(self.real), split_double::sqr(self.imag)).value()
    }

    #[must_use]
    pub fn to_complex(self) -> Complex {
        Complex {
            real: self.real.value(),
            imag: self.imag.value(),
        }
    }
}

impl From<Complex> for SplitComplex {
    fn from(value: Complex) -> Self {
        Self::split(value)
    }
}

impl std::ops::Add for SplitComplex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_round_trips_through_to_complex() {
        let c = Complex::new(-0.6619150588774977, 0.4626763853121446);

        assert_eq!(SplitComplex::split(c).to_complex(), c);
    }

    #[test]
    fn square_matches_f64_for_short_mantissas() {
        let z = SplitComplex::split(Complex::new(2.0, 3.0)) + SplitComplex::ZERO;

        assert_eq!(z.square().to_complex(), Complex::new(-5.0, 12.0));
        assert_eq!(z.magnitude_squared(), 13.0);
    }

    #[test]
    fn offset_preserves_sub_ulp_displacement() {
        let base = SplitComplex::split(Complex::new(-1.5, 0.25));
        let tiny = Complex::new(3e-20, -4e-21);

        let shifted = SplitComplex::offset(base, tiny);

        assert_eq!(shifted.to_complex(), Complex::new(-1.5, 0.25));
        assert_eq!(shifted.real.low, 3e-20);
        assert_eq!(shifted.imag.low, -4e-21);
    }
}
