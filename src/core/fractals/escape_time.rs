//! Escape-time iteration of `z ← z² + c`.
//!
//! The recurrence is written once, generic over [`EscapeValue`], and
//! instantiated for plain `f64` complex numbers and for double-double
//! [`SplitComplex`] values.

use crate::core::data::complex::Complex;
use crate::core::data::split_complex::SplitComplex;
use crate::core::fractals::fractal_kind::FractalKind;
use crate::core::fractals::precision::PrecisionMode;
use std::ops::Add;

/// `|z|² > 4` means `|z| > 2`: the orbit has escaped.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

pub trait EscapeValue: Copy + Add<Output = Self> {
    const ZERO: Self;

    fn square(self) -> Self;

    fn magnitude_squared(&self) -> f64;
}

impl EscapeValue for Complex {
    const ZERO: Self = Complex::ZERO;

    #[inline]
    fn square(self) -> Self {
        Complex::square(self)
    }

    #[inline]
    fn magnitude_squared(&self) -> f64 {
        Complex::magnitude_squared(self)
    }
}

impl EscapeValue for SplitComplex {
    const ZERO: Self = SplitComplex::ZERO;

    #[inline]
    fn square(self) -> Self {
        SplitComplex::square(self)
    }

    #[inline]
    fn magnitude_squared(&self) -> f64 {
        SplitComplex::magnitude_squared(self)
    }
}

/// Counts the updates applied to `z` before `|z|² > 4` is observed.
///
/// The escape test runs before every update, so a seed already outside the
/// radius yields `0` and an orbit that never escapes yields `max_iterations`.
#[inline]
pub fn iterate<T: EscapeValue>(z0: T, c: T, max_iterations: u32) -> u32 {
    let mut z = z0;

    for iteration in 0..max_iterations {
        if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            return iteration;
        }
        z = z.square() + c;
    }

    max_iterations
}

fn orbit_seed<T: EscapeValue>(point: T, constant: T, fractal: FractalKind) -> (T, T) {
    match fractal {
        FractalKind::Mandelbrot => (T::ZERO, point),
        FractalKind::Julia { .. } => (point, constant),
    }
}

#[must_use]
pub fn evaluate_standard(point: Complex, max_iterations: u32, fractal: FractalKind) -> u32 {
    let constant = fractal.constant().unwrap_or(Complex::ZERO);
    let (z0, c) = orbit_seed(point, constant, fractal);

    iterate(z0, c, max_iterations)
}

/// Extended-precision evaluation of a point that already carries its
/// sub-`f64` bits (typically `SplitComplex::offset(center, pixel_offset)`).
#[must_use]
pub fn evaluate_extended(point: SplitComplex, max_iterations: u32, fractal: FractalKind) -> u32 {
    let constant = SplitComplex::split(fractal.constant().unwrap_or(Complex::ZERO));
    let (z0, c) = orbit_seed(point, constant, fractal);

    iterate(z0, c, max_iterations)
}

/// Iteration count in `[0, max_iterations]` for `point`.
#[must_use]
pub fn evaluate(
    point: Complex,
    max_iterations: u32,
    precision: PrecisionMode,
    fractal: FractalKind,
) -> u32 {
    match precision {
        PrecisionMode::Standard => evaluate_standard(point, max_iterations, fractal),
        PrecisionMode::Extended => evaluate_extended(
            SplitComplex::offset(SplitComplex::ZERO, point),
            max_iterations,
            fractal,
        ),
    }
}
