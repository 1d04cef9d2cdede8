//! Volatility sensitivities of FX options.

use pricer_core::sensitivity::SurfaceValue;
use pricer_core::types::Currency;

/// Vega of FX options on one currency pair, keyed by `(expiry, strike)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForexVolatilitySensitivity {
    currency_pair: (Currency, Currency),
    currency: Currency,
    vega: SurfaceValue,
}

impl ForexVolatilitySensitivity {
    /// Creates a sensitivity.
    pub fn new(
        currency_pair: (Currency, Currency),
        currency: Currency,
        vega: SurfaceValue,
    ) -> Self {
        Self {
            currency_pair,
            currency,
            vega,
        }
    }

    /// Single point.
    pub fn of(
        currency_pair: (Currency, Currency),
        currency: Currency,
        expiry: f64,
        strike: f64,
        value: f64,
    ) -> Self {
        Self::new(currency_pair, currency, SurfaceValue::of(expiry, strike, value))
    }

    /// Currency pair of the smile.
    pub fn currency_pair(&self) -> (Currency, Currency) {
        self.currency_pair
    }

    /// Currency the vega is expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Vega by `(expiry, strike)`.
    pub fn vega(&self) -> &SurfaceValue {
        &self.vega
    }

    /// Sum of two sensitivities on the same pair and currency.
    ///
    /// Returns `None` when the pairs or currencies differ.
    pub fn plus(&self, other: &ForexVolatilitySensitivity) -> Option<Self> {
        if self.currency_pair != other.currency_pair || self.currency != other.currency {
            return None;
        }
        Some(Self::new(
            self.currency_pair,
            self.currency,
            self.vega.clone().plus(&other.vega),
        ))
    }

    /// Every vega scaled by `factor`.
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self::new(self.currency_pair, self.currency, self.vega.clone().multiplied_by(factor))
    }
}

/// Vega per node of a delta-quoted smile.
#[derive(Debug, Clone, PartialEq)]
pub struct ForexVolatilityNodeSensitivity {
    currency_pair: (Currency, Currency),
    currency: Currency,
    expiries: Vec<f64>,
    delta: Vec<f64>,
    vega: Vec<Vec<f64>>,
}

impl ForexVolatilityNodeSensitivity {
    /// Creates the node sensitivities; `vega[e][j]` is the value for
    /// expiry `e` and strike index `j` in `0..2n+1`.
    pub fn new(
        currency_pair: (Currency, Currency),
        currency: Currency,
        expiries: Vec<f64>,
        delta: Vec<f64>,
        vega: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            currency_pair,
            currency,
            expiries,
            delta,
            vega,
        }
    }

    /// Currency pair of the smile.
    pub fn currency_pair(&self) -> (Currency, Currency) {
        self.currency_pair
    }

    /// Currency the vega is expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Smile expiries.
    pub fn expiries(&self) -> &[f64] {
        &self.expiries
    }

    /// Smile deltas.
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Vega by expiry and strike index.
    pub fn vega(&self) -> &[Vec<f64>] {
        &self.vega
    }

    /// Sensitivity to the market quotes of each expiry, laid out as
    /// `[ATM, RR_1..RR_n, Strangle_1..Strangle_n]`.
    pub fn quote_sensitivity(&self) -> Vec<Vec<f64>> {
        let n = self.delta.len();
        self.vega
            .iter()
            .map(|v| {
                let mut quotes = vec![0.0; 2 * n + 1];
                quotes[0] = v.iter().sum();
                for i in 0..n {
                    quotes[1 + i] = (v[2 * n - i] - v[i]) / 2.0;
                    quotes[1 + n + i] = v[2 * n - i] + v[i];
                }
                quotes
            })
            .collect()
    }
}
