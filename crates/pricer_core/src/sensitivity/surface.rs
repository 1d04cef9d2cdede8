//! Values on a two-dimensional parameter grid.

use std::collections::BTreeMap;

use super::{TimeKey, TIME_TOLERANCE};

/// Map from `(x, y)` points to values.
///
/// Used for vega by `(expiry, strike)` and for SABR parameter
/// sensitivities by `(expiry, tenor)`. Points within `1e-10` in both
/// coordinates are merged.
///
/// # Example
///
/// ```
/// use pricer_core::sensitivity::SurfaceValue;
///
/// let s = SurfaceValue::of(1.0, 5.0, 2.0).plus(&SurfaceValue::of(1.0, 5.0, 3.0));
/// assert_eq!(s.value(1.0, 5.0), 5.0);
/// assert_eq!(s.value(2.0, 5.0), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceValue {
    values: BTreeMap<(TimeKey, TimeKey), f64>,
}

impl SurfaceValue {
    /// Empty surface.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single point.
    pub fn of(x: f64, y: f64, value: f64) -> Self {
        let mut s = Self::new();
        s.add(x, y, value);
        s
    }

    /// Accumulates `value` at `(x, y)` in place.
    pub fn add(&mut self, x: f64, y: f64, value: f64) {
        let key = self.find(x, y).unwrap_or((TimeKey(x), TimeKey(y)));
        *self.values.entry(key).or_insert(0.0) += value;
    }

    /// Sum over the union of points.
    pub fn plus(mut self, other: &SurfaceValue) -> Self {
        for ((x, y), v) in &other.values {
            self.add(x.0, y.0, *v);
        }
        self
    }

    /// Every value scaled by `factor`.
    pub fn multiplied_by(mut self, factor: f64) -> Self {
        for v in self.values.values_mut() {
            *v *= factor;
        }
        self
    }

    /// Value at `(x, y)`; 0 when absent.
    pub fn value(&self, x: f64, y: f64) -> f64 {
        self.find(x, y)
            .and_then(|k| self.values.get(&k).copied())
            .unwrap_or(0.0)
    }

    /// Points and values ordered by `x` then `y`.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.values.iter().map(|((x, y), v)| (x.0, y.0, *v))
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no point is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Point-wise comparison within `tolerance`; missing points count as 0.
    pub fn approx_eq(&self, other: &SurfaceValue, tolerance: f64) -> bool {
        let diff = self.clone().plus(&other.clone().multiplied_by(-1.0));
        diff.values.values().all(|v| v.abs() <= tolerance)
    }

    fn find(&self, x: f64, y: f64) -> Option<(TimeKey, TimeKey)> {
        let lo = (TimeKey(x - TIME_TOLERANCE), TimeKey(f64::NEG_INFINITY));
        let hi = (TimeKey(x + TIME_TOLERANCE), TimeKey(f64::INFINITY));
        self.values
            .range(lo..=hi)
            .map(|(k, _)| *k)
            .find(|(_, ky)| (ky.0 - y).abs() < TIME_TOLERANCE)
    }
}
