//! Market data error types.
//!
//! Resolution failures (a curve name or FX rate missing from the context)
//! are hard errors: pricing never substitutes a fallback curve.

use thiserror::Error;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::CurveNotFound { name: "Forward".to_string() };
/// assert_eq!(format!("{}", err), "Curve not found: Forward");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Curve name not present in the bundle.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// Requested curve name
        name: String,
    },

    /// Curve name already present when adding.
    #[error("Curve already present: {name}")]
    DuplicateCurve {
        /// Clashing curve name
        name: String,
    },

    /// Negative time passed to a curve or surface.
    #[error("Invalid time: t = {t}")]
    InvalidTime {
        /// The invalid time
        t: f64,
    },

    /// Curve construction data is inconsistent.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of the problem
        reason: String,
    },

    /// Curve has no currency in the side table.
    #[error("No currency registered for curve {name}")]
    CurrencyNotFound {
        /// Curve name
        name: String,
    },

    /// FX rate not available in the matrix.
    #[error("FX rate not found: {from}/{to}")]
    FxRateNotFound {
        /// Base currency code
        from: String,
        /// Quote currency code
        to: String,
    },

    /// Smile data is inconsistent.
    #[error("Invalid smile: {reason}")]
    InvalidSmile {
        /// Description of the problem
        reason: String,
    },
}
