//! Static dispatch enum over the concrete yield curves.

use super::{CurveShift, FlatCurve, InterpolatedCurve, ShiftedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.05);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// let bumped = curve.with_parallel_shift(0.0001);
/// assert!(bumped.discount_factor(1.0).unwrap() < df);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveEnum {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve),
    /// Node-based yield curve
    Interpolated(InterpolatedCurve),
    /// Shifted view of another curve
    Shifted(ShiftedCurve),
}

impl CurveEnum {
    /// Flat curve at `rate`.
    #[inline]
    pub fn flat(rate: f64) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Interpolated curve from nodes.
    pub fn interpolated(times: Vec<f64>, rates: Vec<f64>) -> Result<Self, MarketDataError> {
        Ok(CurveEnum::Interpolated(InterpolatedCurve::new(times, rates)?))
    }

    /// Copy of this curve with every zero rate shifted by `amount`.
    pub fn with_parallel_shift(&self, amount: f64) -> Self {
        CurveEnum::Shifted(ShiftedCurve::new(self.clone(), CurveShift::Parallel(amount)))
    }

    /// Copy of this curve with the zero rate at `time` shifted by `amount`.
    pub fn with_single_shift(&self, time: f64, amount: f64) -> Self {
        CurveEnum::Shifted(ShiftedCurve::new(
            self.clone(),
            CurveShift::SingleNode { time, amount },
        ))
    }
}

impl YieldCurve for CurveEnum {
    #[inline]
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.zero_rate(t),
            CurveEnum::Interpolated(c) => c.zero_rate(t),
            CurveEnum::Shifted(c) => c.zero_rate(t),
        }
    }

    #[inline]
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.discount_factor(t),
            CurveEnum::Interpolated(c) => c.discount_factor(t),
            CurveEnum::Shifted(c) => c.discount_factor(t),
        }
    }
}

impl From<FlatCurve> for CurveEnum {
    fn from(curve: FlatCurve) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl From<InterpolatedCurve> for CurveEnum {
    fn from(curve: InterpolatedCurve) -> Self {
        CurveEnum::Interpolated(curve)
    }
}
