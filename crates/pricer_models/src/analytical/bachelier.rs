//! Bachelier (normal) option formula.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = (F - K)·N(d) + σ√T·φ(d)
//! **Put Price**: P = (K - F)·N(-d) + σ√T·φ(d)
//!
//! Where:
//! - d = (F - K) / (σ√T)
//! - N(·) is the standard normal CDF
//! - φ(·) is the standard normal PDF

use pricer_core::math::distributions::{norm_cdf, norm_pdf};

use super::error::AnalyticalError;

/// Bachelier (normal) model for European option pricing.
///
/// Supports negative forwards, which makes it the natural quoting model
/// for swap rates under Gaussian short-rate dynamics.
///
/// # Examples
/// ```
/// use pricer_models::analytical::Bachelier;
///
/// let model = Bachelier::new(0.01, 0.005).unwrap();
/// let call_price = model.price(0.01, 1.0, true);
/// let put_price = model.price(0.01, 1.0, false);
///
/// // Put-call parity: C - P = F - K
/// assert!((call_price - put_price).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bachelier {
    forward: f64,
    volatility: f64,
}

impl Bachelier {
    /// Creates a new Bachelier model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0
    pub fn new(forward: f64, volatility: f64) -> Result<Self, AnalyticalError> {
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

    /// Returns the normal volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Undiscounted option price.
    pub fn price(&self, strike: f64, expiry: f64, is_call: bool) -> f64 {
        self.price_adjoint(strike, expiry, is_call).price
    }

    /// Price with its derivatives with respect to forward and volatility.
    pub fn price_adjoint(&self, strike: f64, expiry: f64, is_call: bool) -> BachelierPriceAdjoint {
        let omega = if is_call { 1.0 } else { -1.0 };
        let sqrt_t = expiry.max(0.0).sqrt();
        let std_dev = self.volatility * sqrt_t;
        let intrinsic = omega * (self.forward - strike);
        if std_dev < 1e-14 {
            let itm = if intrinsic > 0.0 { 1.0 } else { 0.0 };
            return BachelierPriceAdjoint {
                price: itm * intrinsic,
                forward: itm * omega,
                volatility: 0.0,
            };
        }
        let d = (self.forward - strike) / std_dev;
        let density = norm_pdf(d);
        let nd = norm_cdf(omega * d);
        BachelierPriceAdjoint {
            price: intrinsic * nd + std_dev * density,
            forward: omega * nd,
            volatility: sqrt_t * density,
        }
    }
}

/// Bachelier price with its first-order derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BachelierPriceAdjoint {
    /// Price
    pub price: f64,
    /// ∂price/∂F
    pub forward: f64,
    /// ∂price/∂σ
    pub volatility: f64,
}
