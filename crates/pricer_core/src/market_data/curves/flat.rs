//! Flat yield curve.

use super::traits::{check_time, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Yield curve with one continuously compounded rate for every maturity.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, FlatCurve};
///
/// let curve = FlatCurve::new(0.03);
/// assert_eq!(curve.zero_rate(5.0).unwrap(), 0.03);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatCurve {
    rate: f64,
}

impl FlatCurve {
    /// Creates a flat curve.
    #[inline]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// The constant rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl YieldCurve for FlatCurve {
    #[inline]
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok(self.rate)
    }
}
