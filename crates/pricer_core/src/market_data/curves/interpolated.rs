//! Node-based yield curve with linear interpolation on zero rates.

use super::traits::{check_time, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Yield curve defined by zero rates at node times.
///
/// Rates are interpolated linearly between nodes and extrapolated flat
/// outside the node range.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{YieldCurve, InterpolatedCurve};
///
/// let curve = InterpolatedCurve::new(vec![1.0, 2.0], vec![0.02, 0.04]).unwrap();
/// assert!((curve.zero_rate(1.5).unwrap() - 0.03).abs() < 1e-15);
/// assert_eq!(curve.zero_rate(0.5).unwrap(), 0.02);
/// assert_eq!(curve.zero_rate(9.0).unwrap(), 0.04);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::market_data::raw::InterpolatedCurveRaw")
)]
pub struct InterpolatedCurve {
    times: Vec<f64>,
    rates: Vec<f64>,
}

impl InterpolatedCurve {
    /// Creates a curve from node times and zero rates.
    ///
    /// # Errors
    /// `MarketDataError::InvalidCurve` when the vectors are empty, have
    /// different lengths, or the times are not strictly increasing and
    /// non-negative.
    pub fn new(times: Vec<f64>, rates: Vec<f64>) -> Result<Self, MarketDataError> {
        if times.is_empty() {
            return Err(MarketDataError::InvalidCurve {
                reason: "at least one node is required".to_string(),
            });
        }
        if times.len() != rates.len() {
            return Err(MarketDataError::InvalidCurve {
                reason: format!("{} times for {} rates", times.len(), rates.len()),
            });
        }
        if times[0] < 0.0 || times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MarketDataError::InvalidCurve {
                reason: "node times must be non-negative and strictly increasing".to_string(),
            });
        }
        Ok(Self { times, rates })
    }

    /// Node times.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Node zero rates.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}

impl YieldCurve for InterpolatedCurve {
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        let n = self.times.len();
        if t <= self.times[0] {
            return Ok(self.rates[0]);
        }
        if t >= self.times[n - 1] {
            return Ok(self.rates[n - 1]);
        }
        // first node strictly above t
        let upper = self.times.partition_point(|&x| x <= t);
        let (t0, t1) = (self.times[upper - 1], self.times[upper]);
        let (r0, r1) = (self.rates[upper - 1], self.rates[upper]);
        Ok(r0 + (r1 - r0) * (t - t0) / (t1 - t0))
    }
}
