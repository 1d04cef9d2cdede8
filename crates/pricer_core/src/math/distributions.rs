//! Standard normal distribution.
//!
//! Built on the `statrs` complementary error function so that the tails
//! keep full relative precision.
//!
//! # Example
//!
//! ```
//! use pricer_core::math::distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
//! assert!((norm_inv_cdf(norm_cdf(1.3)) - 1.3).abs() < 1e-10);
//! ```

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

/// 1/√(2π)
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Cumulative distribution function Φ(x).
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Density φ(x).
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Quantile Φ⁻¹(p) for `p` in (0, 1).
///
/// Returns ±∞ at the end points and NaN outside [0, 1].
#[inline]
pub fn norm_inv_cdf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}
