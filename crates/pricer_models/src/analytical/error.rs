//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to the Black and Bachelier formulas

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Negative or non-finite volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Non-positive forward for a lognormal model.
    #[error("Invalid forward: F = {forward}")]
    InvalidForward {
        /// The invalid forward value
        forward: f64,
    },

    /// Negative expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_forward_display() {
        let err = AnalyticalError::InvalidForward { forward: -0.01 };
        assert_eq!(format!("{}", err), "Invalid forward: F = -0.01");
    }

    #[test]
    fn test_invalid_expiry_to_pricing_error() {
        let err = AnalyticalError::InvalidExpiry { expiry: -1.0 };
        let pricing_err: PricingError = err.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => {
                assert!(msg.contains("expiry"));
            }
            _ => panic!("Expected InvalidInput variant"),
        }
    }
}
