//! Instrument error types.
//!
//! Constructors validate their inputs and report the first violation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument construction errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::NegativeTime { name: "payment time", time: -0.5 };
/// assert_eq!(format!("{}", err), "Negative payment time: t = -0.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// A time is negative or not finite.
    #[error("Negative {name}: t = {time}")]
    NegativeTime {
        /// Which time
        name: &'static str,
        /// The invalid value
        time: f64,
    },

    /// An accrual or year fraction is not positive.
    #[error("Non-positive {name}: {value}")]
    NegativeAccrual {
        /// Which accrual factor
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Payments of one leg or instrument are in different currencies.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency of the first payment
        expected: String,
        /// Offending currency
        actual: String,
    },

    /// An annuity has no payment.
    #[error("Annuity has no payment")]
    EmptyAnnuity,

    /// A leg does not have the shape the instrument needs.
    #[error("Invalid leg: {message}")]
    InvalidLeg {
        /// Description of the problem
        message: String,
    },

    /// Any other inconsistent input.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the problem
        message: String,
    },
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Checks that `time` is finite and non-negative.
pub(crate) fn check_time(name: &'static str, time: f64) -> Result<(), InstrumentError> {
    if time >= 0.0 && time.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::NegativeTime { name, time })
    }
}

/// Checks that an accrual factor is finite and positive.
pub(crate) fn check_accrual(name: &'static str, value: f64) -> Result<(), InstrumentError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::NegativeAccrual { name, value })
    }
}
