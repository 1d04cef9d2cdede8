//! Sensitivity accumulators.
//!
//! - [`CurveSensitivity`]: curve name → time → value, the derivative of a
//!   present value with respect to the zero rate at each cash-flow time
//! - [`MultiCurrencyCurveSensitivity`]: one [`CurveSensitivity`] per currency
//! - [`SurfaceValue`]: `(x, y)` point → value, for vega and SABR parameter
//!   sensitivities
//!
//! Accumulation happens in ordered maps; times closer than `1e-10` are
//! one node. The list-of-pairs view is produced only on request.

mod curve;
mod multi_currency;
mod surface;

pub use curve::CurveSensitivity;
pub use multi_currency::MultiCurrencyCurveSensitivity;
pub use surface::SurfaceValue;

use std::cmp::Ordering;

/// Tolerance under which two times are the same node.
pub const TIME_TOLERANCE: f64 = 1e-10;

/// Totally ordered `f64` map key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeKey(pub(crate) f64);

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Existing key within tolerance of `t`, or `t` itself.
pub(crate) fn snap<V>(map: &std::collections::BTreeMap<TimeKey, V>, t: f64) -> TimeKey {
    map.range(TimeKey(t - TIME_TOLERANCE)..=TimeKey(t + TIME_TOLERANCE))
        .next()
        .map(|(k, _)| *k)
        .unwrap_or(TimeKey(t))
}
