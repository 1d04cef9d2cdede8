//! Spot FX rates.

use std::collections::BTreeMap;

use super::error::MarketDataError;
use crate::types::Currency;

/// Spot FX rates quoted against one base currency.
///
/// Each stored rate is the number of base-currency units per unit of the
/// other currency; cross rates are derived from two stored rates.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::FxMatrix;
/// use pricer_core::types::Currency;
///
/// let fx = FxMatrix::new(Currency::USD)
///     .with_rate(Currency::EUR, 1.40)
///     .unwrap()
///     .with_rate(Currency::GBP, 1.60)
///     .unwrap();
/// // USD per EUR
/// assert!((fx.fx_rate(Currency::EUR, Currency::USD).unwrap() - 1.40).abs() < 1e-15);
/// // GBP per EUR
/// assert!((fx.fx_rate(Currency::EUR, Currency::GBP).unwrap() - 0.875).abs() < 1e-15);
/// assert!(fx.fx_rate(Currency::JPY, Currency::USD).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxMatrix {
    base: Currency,
    rates: BTreeMap<Currency, f64>,
}

impl FxMatrix {
    /// Matrix holding only the base currency.
    pub fn new(base: Currency) -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(base, 1.0);
        Self { base, rates }
    }

    /// Adds `currency` worth `rate` units of the base currency.
    ///
    /// # Errors
    /// `MarketDataError::InvalidCurve` when `rate` is not strictly positive.
    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Result<Self, MarketDataError> {
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(MarketDataError::InvalidCurve {
                reason: format!("FX rate for {} must be positive, got {}", currency, rate),
            });
        }
        if currency != self.base {
            self.rates.insert(currency, rate);
        }
        Ok(self)
    }

    /// Base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Units of `to` per unit of `from`.
    ///
    /// # Errors
    /// `MarketDataError::FxRateNotFound` when either currency is missing.
    pub fn fx_rate(&self, from: Currency, to: Currency) -> Result<f64, MarketDataError> {
        if from == to {
            return Ok(1.0);
        }
        let missing = || MarketDataError::FxRateNotFound {
            from: from.to_string(),
            to: to.to_string(),
        };
        let r_from = self.rates.get(&from).ok_or_else(missing)?;
        let r_to = self.rates.get(&to).ok_or_else(missing)?;
        Ok(r_from / r_to)
    }
}
