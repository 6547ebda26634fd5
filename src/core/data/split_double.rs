//! Double-double ("split") arithmetic.
//!
//! A [`SplitDouble`] stores a value as the unevaluated sum `high + low` of two
//! `f64`s, giving roughly 106 bits of significand. Only the operations the
//! escape-time recurrence needs are provided: [`split`], [`add`], [`mul`] and
//! [`sqr`], plus exact negation and doubling.
//!
//! Every function here is a fixed sequence of IEEE-754 operations with no
//! fused multiply-add, so results are bit-for-bit reproducible across
//! platforms.

use std::ops::{Add, Mul, Neg, Sub};

/// Veltkamp splitter `2^27 + 1`.
pub const SPLITTER: f64 = 134_217_729.0;

// `SPLITTER * x` overflows above this magnitude.
const SPLIT_LIMIT: f64 = 6.696_928_794_914_17e299;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SplitDouble {
    pub high: f64,
    pub low: f64,
}

impl SplitDouble {
    pub const ZERO: Self = Self {
        high: 0.0,
        low: 0.0,
    };

    #[must_use]
    pub const fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// Collapses the pair back to the nearest `f64`.
    #[must_use]
    pub fn value(self) -> f64 {
        self.high + self.low
    }

    /// Exact multiplication by two.
    #[must_use]
    pub fn twice(self) -> Self {
        Self {
            high: self.high * 2.0,
            low: self.low * 2.0,
        }
    }
}

/// Splits `x` into a 26-bit `high` part and the exact remainder.
///
/// `high + low == x` holds for every finite input. Magnitudes beyond the
/// splitter's overflow point, infinities and NaN are returned unsplit with
/// `low == 0`.
#[must_use]
pub fn split(x: f64) -> SplitDouble {
    if !(x.abs() <= SPLIT_LIMIT) {
        return SplitDouble { high: x, low: 0.0 };
    }

    let t = SPLITTER * x;
    let high = t - (t - x);

    SplitDouble { high, low: x - high }
}

/// Two-sum of the high parts with both low parts folded into the error term.
#[must_use]
pub fn add(a: SplitDouble, b: SplitDouble) -> SplitDouble {
    let sum = a.high + b.high;
    let overshoot = sum - a.high;
    let error = ((b.high - overshoot) + (a.high - (sum - overshoot))) + a.low + b.low;

    renormalize(sum, error)
}

/// Product of the high parts, its exact rounding error, and the cross terms
/// `a.high * b.low + a.low * b.high`. `a.low * b.low` is below working
/// precision and dropped.
#[must_use]
pub fn mul(a: SplitDouble, b: SplitDouble) -> SplitDouble {
    let product = a.high * b.high;
    let rounding = product_error(a.high, b.high, product);
    let cross = a.high * b.low + a.low * b.high;

    fold_cross_term(product, cross, rounding)
}

/// `mul(a, a)` with the symmetric cross terms computed once.
#[must_use]
pub fn sqr(a: SplitDouble) -> SplitDouble {
    let product = a.high * a.high;
    let parts = split(a.high);
    let rounding = parts.low * parts.low
        + (2.0 * parts.high * parts.low + (parts.high * parts.high - product));
    let cross = 2.0 * a.high * a.low;

    fold_cross_term(product, cross, rounding)
}

/// Exact error of `x * y` given its rounded value (Dekker's two-product).
fn product_error(x: f64, y: f64, product: f64) -> f64 {
    let xs = split(x);
    let ys = split(y);

    xs.low * ys.low + (xs.low * ys.high + (xs.high * ys.low + (xs.high * ys.high - product)))
}

fn fold_cross_term(product: f64, cross: f64, rounding: f64) -> SplitDouble {
    let sum = product + cross;
    let overshoot = sum - product;
    let error = ((cross - overshoot) + (product - (sum - overshoot))) + rounding;

    renormalize(sum, error)
}

fn renormalize(sum: f64, error: f64) -> SplitDouble {
    let high = sum + error;
    let low = error - (high - sum);

    SplitDouble { high, low }
}

impl From<f64> for SplitDouble {
    fn from(x: f64) -> Self {
        split(x)
    }
}

impl Neg for SplitDouble {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            high: -self.high,
            low: -self.low,
        }
    }
}

impl Add for SplitDouble {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        add(self, other)
    }
}

impl Sub for SplitDouble {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        add(self, -other)
    }
}

impl Mul for SplitDouble {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        mul(self, other)
    }
}
