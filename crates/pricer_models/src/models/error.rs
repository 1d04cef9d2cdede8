//! Model parameter errors.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors raised while building or evaluating model parameters.
///
/// # Examples
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::InvalidParameter { name: "rho", value: 1.5 };
/// assert_eq!(err.to_string(), "Invalid model parameter rho = 1.5");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A parameter is outside its domain.
    #[error("Invalid model parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A time or expiry/tenor grid is malformed.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The formula produced a non-finite or non-positive result.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<ModelError> for PricingError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::NumericalInstability(msg) => PricingError::NumericalInstability(msg),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

/// Returns an error unless `value` is finite and in `[low, high]`.
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    low: f64,
    high: f64,
) -> Result<(), ModelError> {
    if value.is_finite() && value >= low && value <= high {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, value })
    }
}

/// Checks that `times` is strictly increasing with non-negative entries.
pub(crate) fn check_increasing(name: &str, times: &[f64]) -> Result<(), ModelError> {
    if times.iter().any(|t| !(t.is_finite() && *t >= 0.0)) {
        return Err(ModelError::InvalidGrid(format!("{} has a negative or non-finite time", name)));
    }
    if times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ModelError::InvalidGrid(format!("{} is not strictly increasing", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numerical_instability_keeps_category() {
        let err: PricingError = ModelError::NumericalInstability("tail".into()).into();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }

    #[test]
    fn test_check_increasing() {
        assert!(check_increasing("grid", &[0.0, 1.0, 2.0]).is_ok());
        assert!(check_increasing("grid", &[0.0, 1.0, 1.0]).is_err());
        assert!(check_increasing("grid", &[-1.0, 1.0]).is_err());
    }

    #[test]
    fn test_check_range_bounds_are_inclusive() {
        assert!(check_range("beta", 1.0, 0.0, 1.0).is_ok());
        assert!(check_range("beta", 1.0001, 0.0, 1.0).is_err());
        assert!(check_range("beta", f64::NAN, 0.0, 1.0).is_err());
    }
}
