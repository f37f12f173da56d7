//! Float comparison helpers tuned for map-unit coordinates.
//!
//! Path coordinates run into the thousands of map units while solver
//! residuals hover near zero, so equality is absolute inside a small band
//! around zero and relative everywhere else.

/// Magnitudes below this band compare as equal regardless of ratio.
pub const SMALL_BAND: f64 = 0.008;

/// Relative tolerance applied outside the small band.
pub const RELATIVE_TOLERANCE: f64 = 0.005;

/// Additive slack for interval clamping during stepping.
pub const INTERVAL_TOLERANCE: f64 = 0.01;

/// Tolerance-aware equality: absolute inside the small band, relative
/// outside it.
///
/// ```
/// use marga_sweep::core::math::approx_eq;
///
/// assert!(approx_eq(0.0, 0.004));
/// assert!(approx_eq(1000.0, 1000.4));
/// assert!(!approx_eq(1000.0, 1010.0));
/// ```
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a.abs() < SMALL_BAND && b.abs() < SMALL_BAND {
        return true;
    }
    ((a - b) / a.max(b)).abs() < RELATIVE_TOLERANCE
}

/// Membership in the closed interval spanned by `a` and `b` (either order),
/// widened by `tolerance` on both ends. A NaN value is never a member.
#[inline]
pub fn in_closed_interval(value: f64, a: f64, b: f64, tolerance: f64) -> bool {
    let lo = a.min(b);
    let hi = a.max(b);
    value >= lo - tolerance && value <= hi + tolerance
}
