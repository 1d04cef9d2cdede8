//! Zero-rate shifted view of another curve.
//!
//! Used to build bumped bundles for finite-difference checks of the
//! curve sensitivities.

use super::curve_enum::CurveEnum;
use super::traits::{check_time, YieldCurve};
use crate::market_data::error::MarketDataError;

/// Time tolerance for matching a single-node shift.
const NODE_TOLERANCE: f64 = 1e-10;

/// Zero-rate shift applied on top of a base curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveShift {
    /// Same shift at every time.
    Parallel(f64),
    /// Shift applied only at one time.
    ///
    /// A discount factor queried at `time` sees the bump; every other
    /// time sees the base curve. This matches the point sensitivity
    /// convention where each cash-flow time is its own node.
    SingleNode {
        /// Shifted time
        time: f64,
        /// Zero-rate shift
        amount: f64,
    },
}

impl CurveShift {
    #[inline]
    fn at(&self, t: f64) -> f64 {
        match *self {
            CurveShift::Parallel(amount) => amount,
            CurveShift::SingleNode { time, amount } => {
                if (t - time).abs() < NODE_TOLERANCE {
                    amount
                } else {
                    0.0
                }
            }
        }
    }
}

/// Curve whose zero rate is the base rate plus a shift.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftedCurve {
    base: Box<CurveEnum>,
    shift: CurveShift,
}

impl ShiftedCurve {
    /// Wraps `base` with `shift`.
    pub fn new(base: CurveEnum, shift: CurveShift) -> Self {
        Self {
            base: Box::new(base),
            shift,
        }
    }

    /// The unshifted curve.
    pub fn base(&self) -> &CurveEnum {
        &self.base
    }

    /// The applied shift.
    pub fn shift(&self) -> CurveShift {
        self.shift
    }
}

impl YieldCurve for ShiftedCurve {
    fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok(self.base.zero_rate(t)? + self.shift.at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parallel_shift_moves_every_rate() {
        let curve = ShiftedCurve::new(CurveEnum::flat(0.02), CurveShift::Parallel(0.001));
        assert_relative_eq!(curve.zero_rate(0.7).unwrap(), 0.021, epsilon = 1e-15);
        assert_relative_eq!(curve.zero_rate(9.0).unwrap(), 0.021, epsilon = 1e-15);
    }

    #[test]
    fn test_single_node_shift_is_local() {
        let curve = ShiftedCurve::new(
            CurveEnum::flat(0.02),
            CurveShift::SingleNode {
                time: 2.0,
                amount: 1e-4,
            },
        );
        assert_relative_eq!(curve.zero_rate(2.0).unwrap(), 0.0201, epsilon = 1e-15);
        assert_eq!(curve.zero_rate(2.5).unwrap(), 0.02);
        assert_eq!(curve.zero_rate(1.999).unwrap(), 0.02);
    }
}
