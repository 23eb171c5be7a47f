//! Float helpers used by allocation test harnesses.

/// Half-width of the window [`approx_eq`] accepts.
///
/// This is 3.0, not a small epsilon. Harnesses written against this
/// tolerance compare coarse quantities such as fill ratios scaled to
/// percent; do not narrow it without auditing those callers.
pub const APPROX_EQ_TOLERANCE: f32 = 3.0;

/// Unclamped linear interpolation from `a` to `b`.
///
/// `t` outside `[0, 1]` extrapolates.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Whether `b` lies strictly inside `a ± APPROX_EQ_TOLERANCE`.
///
/// Returns `false` if either value is NaN.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    a - APPROX_EQ_TOLERANCE < b && a + APPROX_EQ_TOLERANCE > b
}
