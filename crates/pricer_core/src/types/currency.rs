//! ISO 4217 currency codes.
//!
//! Currencies are opaque keys for the engine: they tag amounts, select
//! discounting curves through the curve bundle side table, and index FX
//! rates. Ordering is alphabetical by code so that currency-keyed maps
//! render deterministically.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::Currency;
//!
//! let eur: Currency = "eur".parse().unwrap();
//! assert_eq!(eur, Currency::EUR);
//! assert_eq!(eur.to_string(), "EUR");
//! assert!(Currency::EUR < Currency::USD);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// Trading currencies supported by the engine.
///
/// Enum-based so that currency-keyed containers stay `Copy`-keyed and
/// dispatch stays static.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// Swiss Franc
    CHF,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// United States Dollar
    USD,
}

impl Currency {
    /// All supported currencies, in code order.
    pub const ALL: [Currency; 5] = [
        Currency::CHF,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::USD,
    ];

    /// Returns the ISO 4217 three-letter code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CHF => "CHF",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::USD => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses an ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let upper = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse_round_trip() {
        for currency in Currency::ALL {
            let parsed: Currency = currency.code().parse().unwrap();
            assert_eq!(parsed, currency);
        }
    }

    #[test]
    fn test_currency_parse_case_insensitive() {
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("Gbp".parse::<Currency>().unwrap(), Currency::GBP);
    }

    #[test]
    fn test_currency_parse_unknown() {
        match "XYZ".parse::<Currency>() {
            Err(CurrencyError::UnknownCurrency(code)) => assert_eq!(code, "XYZ"),
            other => panic!("Expected UnknownCurrency, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_ordering_follows_code() {
        let mut sorted = Currency::ALL.to_vec();
        sorted.sort();
        let codes: Vec<&str> = sorted.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["CHF", "EUR", "GBP", "JPY", "USD"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_currency_serde_round_trip() {
        let json = serde_json::to_string(&Currency::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");
        let parsed: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Currency::EUR);
    }
}
