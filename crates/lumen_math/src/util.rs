/// Tolerance under which a scalar is treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is zero within [`EPSILON`].
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps values within [`EPSILON`] of zero to exactly `0.0`.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
