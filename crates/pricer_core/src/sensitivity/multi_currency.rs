//! Curve sensitivities by currency.

use std::collections::BTreeMap;

use super::CurveSensitivity;
use crate::market_data::{FxMatrix, MarketDataError};
use crate::types::Currency;

/// One [`CurveSensitivity`] per currency.
///
/// # Example
///
/// ```
/// use pricer_core::sensitivity::{CurveSensitivity, MultiCurrencyCurveSensitivity};
/// use pricer_core::types::Currency;
///
/// let s = MultiCurrencyCurveSensitivity::of(Currency::USD, CurveSensitivity::of("USD", 1.0, -2.0))
///     .plus(Currency::EUR, CurveSensitivity::of("EUR", 1.0, 5.0));
/// assert_eq!(s.sensitivity(Currency::EUR).total("EUR"), 5.0);
/// assert!(s.sensitivity(Currency::JPY).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiCurrencyCurveSensitivity {
    sensitivities: BTreeMap<Currency, CurveSensitivity>,
}

impl MultiCurrencyCurveSensitivity {
    /// Empty sensitivity.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity in one currency.
    pub fn of(currency: Currency, sensitivity: CurveSensitivity) -> Self {
        Self::new().plus(currency, sensitivity)
    }

    /// Adds a sensitivity expressed in `currency`.
    pub fn plus(mut self, currency: Currency, sensitivity: CurveSensitivity) -> Self {
        let entry = self.sensitivities.remove(&currency).unwrap_or_default();
        self.sensitivities
            .insert(currency, entry.plus(&sensitivity));
        self
    }

    /// Sum over the union of currencies.
    pub fn plus_all(mut self, other: &MultiCurrencyCurveSensitivity) -> Self {
        for (ccy, s) in &other.sensitivities {
            self = self.plus(*ccy, s.clone());
        }
        self
    }

    /// Every currency scaled by `factor`.
    pub fn multiplied_by(self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .into_iter()
                .map(|(c, s)| (c, s.multiplied_by(factor)))
                .collect(),
        }
    }

    /// Sensitivity in `currency`; empty when absent.
    pub fn sensitivity(&self, currency: Currency) -> CurveSensitivity {
        self.sensitivities
            .get(&currency)
            .cloned()
            .unwrap_or_default()
    }

    /// Currencies present.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.sensitivities.keys().copied()
    }

    /// Drops zero nodes and empty currencies.
    pub fn cleaned(self) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .into_iter()
                .map(|(c, s)| (c, s.cleaned()))
                .filter(|(_, s)| !s.is_empty())
                .collect(),
        }
    }

    /// Sum of every currency converted into `currency`.
    pub fn converted_to(
        &self,
        currency: Currency,
        fx: &FxMatrix,
    ) -> Result<CurveSensitivity, MarketDataError> {
        let mut total = CurveSensitivity::new();
        for (ccy, s) in &self.sensitivities {
            let rate = fx.fx_rate(*ccy, currency)?;
            total = total.plus(&s.clone().multiplied_by(rate));
        }
        Ok(total)
    }

    /// Currency-wise [`CurveSensitivity::approx_eq`].
    pub fn approx_eq(&self, other: &MultiCurrencyCurveSensitivity, tolerance: f64) -> bool {
        self.currencies()
            .chain(other.currencies())
            .all(|c| self.sensitivity(c).approx_eq(&other.sensitivity(c), tolerance))
    }
}

impl From<(Currency, CurveSensitivity)> for MultiCurrencyCurveSensitivity {
    fn from((currency, sensitivity): (Currency, CurveSensitivity)) -> Self {
        Self::of(currency, sensitivity)
    }
}
