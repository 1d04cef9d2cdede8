//! Black (lognormal forward) option formula with adjoints.
//!
//! ## Mathematical Formulas
//!
//! **Price**: B = ω·(F·N(ω·d1) − K·N(ω·d2))
//!
//! Where:
//! - d1 = ln(F/K)/(σ√T) + σ√T/2, d2 = d1 − σ√T
//! - ω = +1 for a call, −1 for a put
//!
//! The undiscounted price and its first derivatives with respect to the
//! forward, volatility and strike are returned together.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};

use super::error::AnalyticalError;

/// Below this total volatility the price is the intrinsic value.
const SMALL_STD_DEV: f64 = 1e-14;

/// Black model for one forward and volatility.
///
/// # Examples
/// ```
/// use pricer_models::analytical::Black;
///
/// let black = Black::new(0.03, 0.20).unwrap();
/// let call = black.price(0.03, 2.0, true);
/// let put = black.price(0.03, 2.0, false);
/// assert!((call - put).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Black {
    forward: f64,
    volatility: f64,
}

/// Price with first-order derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPriceAdjoint {
    /// Undiscounted price.
    pub price: f64,
    /// ∂B/∂F
    pub forward: f64,
    /// ∂B/∂σ
    pub volatility: f64,
    /// ∂B/∂K
    pub strike: f64,
}

impl Black {
    /// Creates a Black model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidForward` if forward <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0
    pub fn new(forward: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        if !(forward > 0.0 && forward.is_finite()) {
            return Err(AnalyticalError::InvalidForward { forward });
        }
        if !(volatility >= 0.0 && volatility.is_finite()) {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            forward,
            volatility,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Undiscounted option price.
    pub fn price(&self, strike: f64, expiry: f64, is_call: bool) -> f64 {
        self.price_adjoint(strike, expiry, is_call).price
    }

    /// Price with derivatives with respect to forward, volatility and strike.
    pub fn price_adjoint(&self, strike: f64, expiry: f64, is_call: bool) -> BlackPriceAdjoint {
        let omega = if is_call { 1.0 } else { -1.0 };
        let f = self.forward;
        let sqrt_t = expiry.max(0.0).sqrt();
        let std_dev = self.volatility * sqrt_t;

        if strike <= 0.0 {
            // the option is exercised for sure (call) or worthless (put)
            let exercised = if is_call { 1.0 } else { 0.0 };
            return BlackPriceAdjoint {
                price: exercised * (f - strike),
                forward: exercised,
                volatility: 0.0,
                strike: -exercised,
            };
        }
        if std_dev < SMALL_STD_DEV {
            let itm = if omega * (f - strike) > 0.0 { 1.0 } else { 0.0 };
            return BlackPriceAdjoint {
                price: itm * omega * (f - strike),
                forward: itm * omega,
                volatility: 0.0,
                strike: -itm * omega,
            };
        }

        let (d1, d2) = d1_d2(f, strike, std_dev);
        let nd1 = norm_cdf(omega * d1);
        let nd2 = norm_cdf(omega * d2);
        BlackPriceAdjoint {
            price: omega * (f * nd1 - strike * nd2),
            forward: omega * nd1,
            volatility: f * norm_pdf(d1) * sqrt_t,
            strike: -omega * nd2,
        }
    }
}

#[inline]
fn d1_d2(forward: f64, strike: f64, std_dev: f64) -> (f64, f64) {
    let d1 = (forward / strike).ln() / std_dev + 0.5 * std_dev;
    (d1, d1 - std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const F: f64 = 0.035;
    const T: f64 = 3.0;

    fn bump_price(forward: f64, vol: f64, strike: f64, is_call: bool) -> f64 {
        Black::new(forward, vol).unwrap().price(strike, T, is_call)
    }

    // ==========================================================
    // Price
    // ==========================================================

    #[test]
    fn test_rejects_non_positive_forward() {
        assert!(Black::new(0.0, 0.2).is_err());
        assert!(Black::new(0.01, -0.2).is_err());
    }

    #[test]
    fn test_put_call_parity() {
        let black = Black::new(F, 0.25).unwrap();
        for k in [0.01, 0.03, 0.05, 0.09] {
            let parity = black.price(k, T, true) - black.price(k, T, false);
            assert_relative_eq!(parity, F - k, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_zero_volatility_is_intrinsic() {
        let black = Black::new(F, 0.0).unwrap();
        assert_relative_eq!(black.price(0.03, T, true), 0.005, epsilon = 1e-15);
        assert_eq!(black.price(0.03, T, false), 0.0);
    }

    #[test]
    fn test_zero_strike_call_is_forward() {
        let black = Black::new(F, 0.3).unwrap();
        assert_eq!(black.price(0.0, T, true), F);
        assert_eq!(black.price(0.0, T, false), 0.0);
    }

    // ==========================================================
    // Adjoint
    // ==========================================================

    #[test]
    fn test_first_derivatives_match_finite_difference() {
        let (vol, k, h) = (0.22, 0.04, 1e-7);
        for is_call in [true, false] {
            let adj = Black::new(F, vol).unwrap().price_adjoint(k, T, is_call);
            let df = (bump_price(F + h, vol, k, is_call) - bump_price(F - h, vol, k, is_call))
                / (2.0 * h);
            let dv = (bump_price(F, vol + h, k, is_call) - bump_price(F, vol - h, k, is_call))
                / (2.0 * h);
            let dk = (bump_price(F, vol, k + h, is_call) - bump_price(F, vol, k - h, is_call))
                / (2.0 * h);
            assert_relative_eq!(adj.forward, df, epsilon = 1e-7);
            assert_relative_eq!(adj.volatility, dv, epsilon = 1e-7);
            assert_relative_eq!(adj.strike, dk, epsilon = 1e-7);
        }
    }
}
