//! Numerical settings for the pricing methods.
//!
//! Loaded from defaults, a TOML file or string, and environment variables,
//! in that order of increasing priority.

use std::path::Path;

use pricer_core::math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting is outside its domain.
    #[error("Invalid configuration: {name} = {value}")]
    InvalidValue {
        /// Setting name
        name: &'static str,
        /// Offending value, as text
        value: String,
    },

    /// The file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// An environment override could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Numerical settings shared by the pricing methods.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `sabr_cutoff_strike` | 0.08 | Strike above which SABR prices are extrapolated |
/// | `sabr_tail_mu` | 10.0 | Decay parameter of the extrapolated tail |
/// | `integration_limit` | 10.0 | Half-width of the Gaussian integration range |
/// | `integration_points` | 1000 | Simpson intervals (even) |
/// | `root_tolerance` | 1e-12 | Root finder tolerance |
/// | `root_max_iterations` | 200 | Root finder iteration budget |
///
/// # Examples
///
/// ```
/// use pricer_pricing::PricingConfig;
///
/// let config = PricingConfig::from_toml_str("sabr_cutoff_strike = 0.10").unwrap();
/// assert_eq!(config.sabr_cutoff_strike, 0.10);
/// assert_eq!(config.sabr_tail_mu, 10.0);
///
/// let custom = PricingConfig::default().with_integration_points(400);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Cutoff strike of the SABR right-tail extrapolation.
    pub sabr_cutoff_strike: f64,
    /// Tail parameter μ of the SABR extrapolation.
    pub sabr_tail_mu: f64,
    /// Integration over the Gaussian factor uses `[-limit, limit]`.
    pub integration_limit: f64,
    /// Number of Simpson intervals.
    pub integration_points: usize,
    /// Root finder tolerance.
    pub root_tolerance: f64,
    /// Root finder iteration budget.
    pub root_max_iterations: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            sabr_cutoff_strike: 0.08,
            sabr_tail_mu: 10.0,
            integration_limit: 10.0,
            integration_points: 1000,
            root_tolerance: 1e-12,
            root_max_iterations: 200,
        }
    }
}

impl PricingConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SABR cutoff strike.
    pub fn with_sabr_cutoff_strike(mut self, cutoff: f64) -> Self {
        self.sabr_cutoff_strike = cutoff;
        self
    }

    /// Sets the SABR tail parameter.
    pub fn with_sabr_tail_mu(mut self, mu: f64) -> Self {
        self.sabr_tail_mu = mu;
        self
    }

    /// Sets the integration half-width.
    pub fn with_integration_limit(mut self, limit: f64) -> Self {
        self.integration_limit = limit;
        self
    }

    /// Sets the number of Simpson intervals.
    pub fn with_integration_points(mut self, points: usize) -> Self {
        self.integration_points = points;
        self
    }

    /// Sets the root finder tolerance.
    pub fn with_root_tolerance(mut self, tolerance: f64) -> Self {
        self.root_tolerance = tolerance;
        self
    }

    /// Root finder settings.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.root_tolerance, self.root_max_iterations)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sabr_cutoff_strike", self.sabr_cutoff_strike),
            ("sabr_tail_mu", self.sabr_tail_mu),
            ("integration_limit", self.integration_limit),
            ("root_tolerance", self.root_tolerance),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: value.to_string(),
                });
            }
        }
        if self.integration_points < 2 || self.integration_points % 2 != 0 {
            return Err(ConfigError::InvalidValue {
                name: "integration_points",
                value: self.integration_points.to_string(),
            });
        }
        if self.root_max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                name: "root_max_iterations",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Applies `PRICER_SABR_CUTOFF`, `PRICER_SABR_MU` and
    /// `PRICER_INTEGRATION_POINTS` when set.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(value) = std::env::var("PRICER_SABR_CUTOFF") {
            self.sabr_cutoff_strike = parse_env("PRICER_SABR_CUTOFF", &value)?;
        }
        if let Ok(value) = std::env::var("PRICER_SABR_MU") {
            self.sabr_tail_mu = parse_env("PRICER_SABR_MU", &value)?;
        }
        if let Ok(value) = std::env::var("PRICER_INTEGRATION_POINTS") {
            self.integration_points = parse_env("PRICER_INTEGRATION_POINTS", &value)?;
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} has invalid value '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert_eq!(config.sabr_cutoff_strike, 0.08);
        assert_eq!(config.sabr_tail_mu, 10.0);
        assert_eq!(config.integration_points, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = PricingConfig::new()
            .with_sabr_cutoff_strike(0.10)
            .with_sabr_tail_mu(5.0)
            .with_integration_limit(8.0)
            .with_integration_points(500)
            .with_root_tolerance(1e-10);
        assert_eq!(config.sabr_cutoff_strike, 0.10);
        assert_eq!(config.sabr_tail_mu, 5.0);
        assert_eq!(config.integration_limit, 8.0);
        assert_eq!(config.solver_config().tolerance, 1e-10);
        // 500 is even
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_odd_points() {
        let config = PricingConfig::default().with_integration_points(101);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                name: "integration_points",
                ..
            })
        ));
    }

    #[test]
    fn test_config_validation_negative_cutoff() {
        let config = PricingConfig::default().with_sabr_cutoff_strike(-0.01);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = PricingConfig::from_toml_str(
            "sabr_tail_mu = 2.5\nintegration_points = 200\n",
        )
        .unwrap();
        assert_eq!(config.sabr_tail_mu, 2.5);
        assert_eq!(config.integration_points, 200);
        assert_eq!(config.sabr_cutoff_strike, 0.08);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let result = PricingConfig::from_toml_str("sabr_tail_mu = \"high\"");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = PricingConfig::from_file("/nonexistent/pricing.toml");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("PRICER_SABR_CUTOFF", "0.12");
        std::env::set_var("PRICER_INTEGRATION_POINTS", "not-a-number");
        let result = PricingConfig::default().with_env_overrides();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));

        std::env::set_var("PRICER_INTEGRATION_POINTS", "600");
        let config = PricingConfig::default().with_env_overrides().unwrap();
        assert_eq!(config.sabr_cutoff_strike, 0.12);
        assert_eq!(config.integration_points, 600);

        std::env::remove_var("PRICER_SABR_CUTOFF");
        std::env::remove_var("PRICER_INTEGRATION_POINTS");
    }
}
