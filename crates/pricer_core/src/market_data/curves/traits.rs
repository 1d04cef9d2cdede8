//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;

/// Discount curve contract.
///
/// Implementations supply the continuously compounded zero rate; the
/// discount factor follows as `P(t) = exp(-r(t)·t)`, which gives
/// `P(0) = 1` and strictly positive values by construction.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.05);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
/// assert!(curve.discount_factor(-1.0).is_err());
/// ```
pub trait YieldCurve {
    /// Continuously compounded zero rate for time `t >= 0`.
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError>;

    /// Discount factor for time `t >= 0`.
    ///
    /// # Errors
    /// `MarketDataError::InvalidTime` when `t` is negative or not finite.
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok((-self.zero_rate(t)? * t).exp())
    }

    /// Simply compounded forward rate between `t1` and `t2`.
    fn forward_rate(&self, t1: f64, t2: f64) -> Result<f64, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidTime { t: t2 - t1 });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }
}

/// Rejects negative or non-finite times.
#[inline]
pub(crate) fn check_time(t: f64) -> Result<(), MarketDataError> {
    if t < 0.0 || !t.is_finite() {
        return Err(MarketDataError::InvalidTime { t });
    }
    Ok(())
}
