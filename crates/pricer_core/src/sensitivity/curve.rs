//! Curve point sensitivities.

use std::collections::BTreeMap;

use super::{snap, TimeKey};

/// Present value sensitivity to curve zero rates, per curve and time.
///
/// The value stored at `(curve, t)` is `∂PV/∂r(t)`, which for a discount
/// factor adjoint `P̄` is `-t · P(t) · P̄`.
///
/// # Example
///
/// ```
/// use pricer_core::sensitivity::CurveSensitivity;
///
/// let a = CurveSensitivity::of("Funding", 1.0, -10.0);
/// let b = CurveSensitivity::of("Funding", 1.0 + 1e-12, -5.0)
///     .plus(&CurveSensitivity::of("Forward", 0.5, 3.0));
/// let total = a.plus(&b);
/// assert_eq!(total.to_pairs("Funding"), vec![(1.0, -15.0)]);
/// assert_eq!(total.total("Forward"), 3.0);
/// assert!(total.to_pairs("Missing").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSensitivity {
    sensitivities: BTreeMap<String, BTreeMap<TimeKey, f64>>,
}

impl CurveSensitivity {
    /// Empty sensitivity.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single node sensitivity.
    pub fn of(curve: impl Into<String>, time: f64, value: f64) -> Self {
        let mut s = Self::new();
        s.add(curve, time, value);
        s
    }

    /// Sensitivity of one curve from `(time, value)` pairs.
    pub fn from_pairs(curve: impl Into<String>, pairs: &[(f64, f64)]) -> Self {
        let curve = curve.into();
        let mut s = Self::new();
        for &(t, v) in pairs {
            s.add(curve.clone(), t, v);
        }
        s
    }

    /// Accumulates `value` at `(curve, time)` in place.
    pub fn add(&mut self, curve: impl Into<String>, time: f64, value: f64) {
        let nodes = self.sensitivities.entry(curve.into()).or_default();
        let key = snap(nodes, time);
        *nodes.entry(key).or_insert(0.0) += value;
    }

    /// Sum of two sensitivities over the union of their nodes.
    pub fn plus(mut self, other: &CurveSensitivity) -> Self {
        for (curve, nodes) in &other.sensitivities {
            for (t, v) in nodes {
                self.add(curve.as_str(), t.0, *v);
            }
        }
        self
    }

    /// Every node scaled by `factor`.
    pub fn multiplied_by(mut self, factor: f64) -> Self {
        for v in self.sensitivities.values_mut().flat_map(|n| n.values_mut()) {
            *v *= factor;
        }
        self
    }

    /// Drops exact-zero nodes and curves left empty.
    ///
    /// Nodes are merged on insertion, so this only removes zeros.
    pub fn cleaned(mut self) -> Self {
        for nodes in self.sensitivities.values_mut() {
            nodes.retain(|_, v| *v != 0.0);
        }
        self.sensitivities.retain(|_, nodes| !nodes.is_empty());
        self
    }

    /// Ordered `(time, value)` pairs for `curve`; empty when absent.
    pub fn to_pairs(&self, curve: &str) -> Vec<(f64, f64)> {
        self.sensitivities
            .get(curve)
            .map(|nodes| nodes.iter().map(|(t, v)| (t.0, *v)).collect())
            .unwrap_or_default()
    }

    /// Curve names with at least one node.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.sensitivities.keys().map(String::as_str)
    }

    /// Sum over the nodes of `curve`: the parallel-shift sensitivity.
    pub fn total(&self, curve: &str) -> f64 {
        self.sensitivities
            .get(curve)
            .map(|nodes| nodes.values().sum())
            .unwrap_or(0.0)
    }

    /// Whether no node is stored.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.values().all(BTreeMap::is_empty)
    }

    /// Node-wise comparison within `tolerance`; missing nodes count as 0.
    pub fn approx_eq(&self, other: &CurveSensitivity, tolerance: f64) -> bool {
        let diff = self.clone().plus(&other.clone().multiplied_by(-1.0));
        diff.sensitivities
            .values()
            .flat_map(|n| n.values())
            .all(|v| v.abs() <= tolerance)
    }
}
