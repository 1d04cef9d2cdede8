//! Yield curves.
//!
//! This module provides:
//! - [`YieldCurve`]: discount factor and forward rate contract
//! - [`FlatCurve`]: constant rate curve
//! - [`InterpolatedCurve`]: node-based curve, linear on zero rates
//! - [`ShiftedCurve`]: parallel or single-node bumped view of a curve
//! - [`CurveEnum`]: static dispatch over the above

mod curve_enum;
mod flat;
mod interpolated;
mod shifted;
mod traits;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use shifted::{CurveShift, ShiftedCurve};
pub use traits::YieldCurve;

pub(crate) use traits::check_time;
