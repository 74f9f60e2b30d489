//! Numeric guards shared by the formula modules

use crate::constants::numeric::EPSILON;

/// Non-finite → `fallback`
#[inline]
pub(crate) fn finite_or(x: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}

/// Finite and >= 0
#[inline]
pub(crate) fn non_negative(x: f64) -> f64 {
    finite_or(x, 0.0).max(0.0)
}

/// Division with an epsilon-floored denominator (denominators here are
/// weights and speeds, never negative by construction)
#[inline]
pub(crate) fn safe_div(num: f64, den: f64) -> f64 {
    num / den.max(EPSILON)
}

/// `clamp` that maps non-finite input to `lo`
#[inline]
pub(crate) fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    finite_or(x, lo).clamp(lo, hi)
}
