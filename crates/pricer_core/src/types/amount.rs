//! Currency amounts.
//!
//! A [`CurrencyAmount`] pairs a currency with a signed quantity. A
//! [`MultiCurrencyAmount`] maps each currency to one amount; adding two of
//! them works over the union of their keys.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyAmount, MultiCurrencyAmount};
//!
//! let total = MultiCurrencyAmount::of(Currency::EUR, 100.0)
//!     .plus(CurrencyAmount::new(Currency::USD, 50.0))
//!     .plus(CurrencyAmount::new(Currency::EUR, -30.0));
//! assert_eq!(total.amount(Currency::EUR), 70.0);
//! assert_eq!(total.amount(Currency::USD), 50.0);
//! assert_eq!(total.amount(Currency::JPY), 0.0);
//! ```

use std::collections::BTreeMap;

use super::currency::Currency;
use super::error::CurrencyError;
use crate::market_data::{FxMatrix, MarketDataError};

/// A signed amount in one currency.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount.
    #[inline]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Currency of the amount.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Signed quantity.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds an amount in the same currency.
    ///
    /// # Errors
    /// `CurrencyError::Mismatch` when the currencies differ.
    pub fn plus(&self, other: CurrencyAmount) -> Result<CurrencyAmount, CurrencyError> {
        if self.currency != other.currency {
            return Err(CurrencyError::Mismatch {
                expected: self.currency.to_string(),
                actual: other.currency.to_string(),
            });
        }
        Ok(CurrencyAmount::new(self.currency, self.amount + other.amount))
    }

    /// Scales the amount.
    #[inline]
    pub fn multiplied_by(&self, factor: f64) -> CurrencyAmount {
        CurrencyAmount::new(self.currency, self.amount * factor)
    }
}

/// Amounts in several currencies, one entry per currency.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// Empty amount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-currency amount.
    pub fn of(currency: Currency, amount: f64) -> Self {
        Self::new().plus(CurrencyAmount::new(currency, amount))
    }

    /// Adds one currency amount, creating the entry when absent.
    pub fn plus(mut self, amount: CurrencyAmount) -> Self {
        *self.amounts.entry(amount.currency()).or_insert(0.0) += amount.amount();
        self
    }

    /// Adds another multi-currency amount over the union of currencies.
    pub fn plus_all(mut self, other: &MultiCurrencyAmount) -> Self {
        for (currency, amount) in &other.amounts {
            *self.amounts.entry(*currency).or_insert(0.0) += *amount;
        }
        self
    }

    /// Scales every entry.
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            amounts: self
                .amounts
                .iter()
                .map(|(c, a)| (*c, a * factor))
                .collect(),
        }
    }

    /// Amount in `currency`, zero when the currency is absent.
    #[inline]
    pub fn amount(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Amount in `currency` if present.
    pub fn get(&self, currency: Currency) -> Option<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|a| CurrencyAmount::new(currency, *a))
    }

    /// Currencies present, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Entries as currency amounts, in code order.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(c, a)| CurrencyAmount::new(*c, *a))
    }

    /// Number of currencies.
    #[inline]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// True when no currency is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Total converted into `currency` with the FX matrix.
    ///
    /// # Errors
    /// `MarketDataError::FxRateNotFound` when a rate is missing.
    pub fn converted_to(
        &self,
        currency: Currency,
        fx: &FxMatrix,
    ) -> Result<CurrencyAmount, MarketDataError> {
        let mut total = 0.0;
        for (c, a) in &self.amounts {
            total += a * fx.fx_rate(*c, currency)?;
        }
        Ok(CurrencyAmount::new(currency, total))
    }
}

impl From<CurrencyAmount> for MultiCurrencyAmount {
    fn from(amount: CurrencyAmount) -> Self {
        MultiCurrencyAmount::new().plus(amount)
    }
}

impl FromIterator<CurrencyAmount> for MultiCurrencyAmount {
    fn from_iter<I: IntoIterator<Item = CurrencyAmount>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MultiCurrencyAmount::new(), |acc, a| acc.plus(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_currency_amount_plus_same_currency() {
        let a = CurrencyAmount::new(Currency::USD, 10.0);
        let b = CurrencyAmount::new(Currency::USD, 2.5);
        assert_eq!(a.plus(b).unwrap().amount(), 12.5);
    }

    #[test]
    fn test_currency_amount_plus_mismatch() {
        let a = CurrencyAmount::new(Currency::USD, 10.0);
        let b = CurrencyAmount::new(Currency::EUR, 2.5);
        assert!(matches!(a.plus(b), Err(CurrencyError::Mismatch { .. })));
    }

    #[test]
    fn test_multi_currency_union_of_keys() {
        let left = MultiCurrencyAmount::of(Currency::EUR, 1.0).plus(CurrencyAmount::new(
            Currency::USD,
            2.0,
        ));
        let right = MultiCurrencyAmount::of(Currency::USD, 3.0).plus(CurrencyAmount::new(
            Currency::GBP,
            4.0,
        ));
        let sum = left.plus_all(&right);
        assert_eq!(sum.len(), 3);
        assert_eq!(sum.amount(Currency::EUR), 1.0);
        assert_eq!(sum.amount(Currency::USD), 5.0);
        assert_eq!(sum.amount(Currency::GBP), 4.0);
    }

    #[test]
    fn test_multi_currency_scaling() {
        let m = MultiCurrencyAmount::of(Currency::EUR, 2.0).multiplied_by(-1.5);
        assert_relative_eq!(m.amount(Currency::EUR), -3.0);
    }

    #[test]
    fn test_multi_currency_conversion() {
        let fx = FxMatrix::new(Currency::USD).with_rate(Currency::EUR, 1.4).unwrap();
        let m = MultiCurrencyAmount::of(Currency::EUR, 100.0).plus(CurrencyAmount::new(
            Currency::USD,
            10.0,
        ));
        let usd = m.converted_to(Currency::USD, &fx).unwrap();
        assert_relative_eq!(usd.amount(), 150.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collect_from_amounts() {
        let m: MultiCurrencyAmount = vec![
            CurrencyAmount::new(Currency::JPY, 1.0),
            CurrencyAmount::new(Currency::JPY, 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(m.amount(Currency::JPY), 2.0);
    }
}
