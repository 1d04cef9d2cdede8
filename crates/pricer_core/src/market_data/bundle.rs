//! Named curve bundle.

use std::collections::BTreeMap;

use super::curves::CurveEnum;
use super::error::MarketDataError;
use crate::types::Currency;

/// Immutable snapshot of the yield curves used by one valuation.
///
/// Curves are looked up by name. Every mutating operation returns a new
/// bundle, so a bundle can be shared across threads while bumped copies
/// are built for finite-difference checks.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{CurveBundle, CurveEnum, MarketDataError};
///
/// let bundle = CurveBundle::new().with_curve("Funding", CurveEnum::flat(0.02));
/// let err = bundle.add_curve("Funding", CurveEnum::flat(0.03)).unwrap_err();
/// assert!(matches!(err, MarketDataError::DuplicateCurve { .. }));
///
/// let bumped = bundle
///     .replace_curve("Funding", CurveEnum::flat(0.02).with_parallel_shift(1e-4))
///     .unwrap();
/// assert_ne!(bundle, bumped);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveBundle {
    curves: BTreeMap<String, CurveEnum>,
    currencies: BTreeMap<String, Currency>,
}

impl CurveBundle {
    /// Creates an empty bundle.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bundle with `curve` stored under `name`, replacing any
    /// curve of that name.
    pub fn with_curve(mut self, name: impl Into<String>, curve: CurveEnum) -> Self {
        self.curves.insert(name.into(), curve);
        self
    }

    /// Returns the bundle with `name` tagged as a curve in `currency`.
    pub fn with_curve_currency(mut self, name: impl Into<String>, currency: Currency) -> Self {
        self.currencies.insert(name.into(), currency);
        self
    }

    /// New bundle with an additional curve.
    ///
    /// # Errors
    /// `MarketDataError::DuplicateCurve` when `name` is already present.
    pub fn add_curve(&self, name: &str, curve: CurveEnum) -> Result<Self, MarketDataError> {
        if self.curves.contains_key(name) {
            return Err(MarketDataError::DuplicateCurve {
                name: name.to_string(),
            });
        }
        Ok(self.clone().with_curve(name, curve))
    }

    /// New bundle with the curve `name` replaced.
    ///
    /// # Errors
    /// `MarketDataError::CurveNotFound` when `name` is absent.
    pub fn replace_curve(&self, name: &str, curve: CurveEnum) -> Result<Self, MarketDataError> {
        if !self.curves.contains_key(name) {
            return Err(MarketDataError::CurveNotFound {
                name: name.to_string(),
            });
        }
        Ok(self.clone().with_curve(name, curve))
    }

    /// New bundle holding the curves of both bundles.
    ///
    /// # Errors
    /// `MarketDataError::DuplicateCurve` on the first clashing name.
    pub fn merge(&self, other: &CurveBundle) -> Result<Self, MarketDataError> {
        let mut merged = self.clone();
        for (name, curve) in &other.curves {
            if merged.curves.contains_key(name) {
                return Err(MarketDataError::DuplicateCurve { name: name.clone() });
            }
            merged.curves.insert(name.clone(), curve.clone());
        }
        for (name, ccy) in &other.currencies {
            merged.currencies.entry(name.clone()).or_insert(*ccy);
        }
        Ok(merged)
    }

    /// Curve stored under `name`.
    ///
    /// # Errors
    /// `MarketDataError::CurveNotFound` when `name` is absent.
    pub fn get_curve(&self, name: &str) -> Result<&CurveEnum, MarketDataError> {
        self.curves
            .get(name)
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: name.to_string(),
            })
    }

    /// Currency registered for `name`.
    pub fn curve_currency(&self, name: &str) -> Result<Currency, MarketDataError> {
        self.currencies
            .get(name)
            .copied()
            .ok_or_else(|| MarketDataError::CurrencyNotFound {
                name: name.to_string(),
            })
    }

    /// Whether a curve named `name` is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Curve names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the bundle holds no curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
