/// Ease-in-out cubic: slow start, fast middle, slow end.
///
/// Input is clamped to `[0, 1]`; NaN maps to `0`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if !(t > 0.0) {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
