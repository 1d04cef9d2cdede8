//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors surfaced by pricing methods and calculators
//! - `CurrencyError`: Errors from currency parsing and amount arithmetic
//! - `SolverError`: Errors from root-finding

use thiserror::Error;

use crate::market_data::MarketDataError;

/// Categorised pricing errors.
///
/// Argument errors fail at method entry, resolution errors come from the
/// market data context, and dispatch errors flag (instrument, calculation)
/// pairs that have no pricing route.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::unsupported("SwaptionCash", "present value (discounting)");
/// assert_eq!(
///     err.to_string(),
///     "Unsupported instrument: SwaptionCash for present value (discounting)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// The requested calculation has no route for this instrument variant.
    #[error("Unsupported instrument: {instrument} for {calculation}")]
    UnsupportedInstrument {
        /// Instrument variant name
        instrument: String,
        /// Calculation name
        calculation: String,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical procedure failed to produce a finite result.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Market data lookup failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Root search failed.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Currency mismatch or parse failure.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

impl PricingError {
    /// Builds an `UnsupportedInstrument` error.
    pub fn unsupported(instrument: impl Into<String>, calculation: impl Into<String>) -> Self {
        PricingError::UnsupportedInstrument {
            instrument: instrument.into(),
            calculation: calculation.into(),
        }
    }
}

/// Currency-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: {expected} vs {actual}")]
    Mismatch {
        /// Currency of the receiving amount
        expected: String,
        /// Currency of the other amount
        actual: String,
    },
}

/// Root-finding errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Function values at the bracket end-points share a sign.
    #[error("No sign change in bracket [{a}, {b}]")]
    NoBracket {
        /// Left end-point
        a: f64,
        /// Right end-point
        b: f64,
    },

    /// Iteration budget exhausted.
    #[error("Solver did not converge within {iterations} iterations")]
    MaxIterationsExceeded {
        /// Iterations performed
        iterations: usize,
    },

    /// The function returned a non-finite value.
    #[error("Non-finite function value at x = {x}")]
    NonFinite {
        /// Evaluation point
        x: f64,
    },
}
