//! Hull-White one-factor model with piecewise-constant volatility.
//!
//! The short rate follows:
//! ```text
//! dr(t) = [theta(t) - a * r(t)] * dt + sigma(t) * dW(t)
//! ```
//! where theta(t) fits the initial discount curve exactly, `a` is the mean
//! reversion and sigma(t) is constant between the volatility change times.
//!
//! ## Bond dynamics
//!
//! Between `θ₀` and `θ₁` the ratio of two zero-coupon bonds is lognormal:
//! ```text
//! P(θ₁, v) / P(θ₁, u) = P(θ₀, v) / P(θ₀, u) · exp(−α X − α²/2),  X ~ N(0, 1)
//! ```
//! under the `u`-forward measure, with
//! ```text
//! α = (e^(−a u) − e^(−a v)) / a · sqrt(∫_θ₀^θ₁ sigma(s)² e^(2 a s) ds)
//! ```

use crate::models::error::{check_increasing, ModelError};

/// Below this |a| the zero mean-reversion limits are used.
const SMALL_MEAN_REVERSION: f64 = 1e-10;

/// Hull-White one-factor parameters.
///
/// `volatility[i]` applies on `[t_i, t_{i+1})` where the grid is
/// `0, volatility_time[0], ..., volatility_time[n-2], +∞`.
///
/// # Example
///
/// ```
/// use pricer_models::models::HullWhiteParameters;
///
/// let params = HullWhiteParameters::new(0.01, vec![0.01, 0.012], vec![5.0]).unwrap();
/// assert_eq!(params.volatility_at(6.0), 0.012);
/// let alpha = params.alpha(0.0, 5.0, 5.0, 10.0);
/// assert!(alpha > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::models::raw::HullWhiteParametersRaw")
)]
pub struct HullWhiteParameters {
    mean_reversion: f64,
    volatility: Vec<f64>,
    volatility_time: Vec<f64>,
}

impl HullWhiteParameters {
    /// Creates the parameters.
    ///
    /// # Errors
    /// - `ModelError::InvalidParameter` for a non-finite mean reversion or
    ///   a negative volatility
    /// - `ModelError::InvalidGrid` if the change times are not strictly
    ///   increasing and positive, or there is not one fewer of them than
    ///   volatilities
    pub fn new(
        mean_reversion: f64,
        volatility: Vec<f64>,
        volatility_time: Vec<f64>,
    ) -> Result<Self, ModelError> {
        if !mean_reversion.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "mean reversion",
                value: mean_reversion,
            });
        }
        if let Some(v) = volatility.iter().find(|v| !(**v >= 0.0 && v.is_finite())) {
            return Err(ModelError::InvalidParameter {
                name: "volatility",
                value: *v,
            });
        }
        if volatility.is_empty() || volatility_time.len() + 1 != volatility.len() {
            return Err(ModelError::InvalidGrid(format!(
                "{} volatilities need {} change times, got {}",
                volatility.len(),
                volatility.len().saturating_sub(1),
                volatility_time.len()
            )));
        }
        check_increasing("volatility times", &volatility_time)?;
        if volatility_time.first().is_some_and(|t| *t <= 0.0) {
            return Err(ModelError::InvalidGrid(
                "volatility change times must be positive".to_string(),
            ));
        }
        Ok(Self {
            mean_reversion,
            volatility,
            volatility_time,
        })
    }

    /// Constant volatility.
    pub fn constant(mean_reversion: f64, volatility: f64) -> Result<Self, ModelError> {
        Self::new(mean_reversion, vec![volatility], Vec::new())
    }

    /// Mean reversion `a`.
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Volatility levels.
    pub fn volatility(&self) -> &[f64] {
        &self.volatility
    }

    /// Interior volatility change times.
    pub fn volatility_time(&self) -> &[f64] {
        &self.volatility_time
    }

    /// Volatility in force at `t`.
    pub fn volatility_at(&self, t: f64) -> f64 {
        let index = self.volatility_time.partition_point(|s| *s <= t);
        self.volatility[index]
    }

    /// `∫_start^end sigma(s)² e^(2 a s) ds`; zero when `end <= start`.
    pub fn gamma(&self, start: f64, end: f64) -> f64 {
        if end <= start {
            return 0.0;
        }
        let a = self.mean_reversion;
        let mut total = 0.0;
        let mut lower = start;
        for (i, sigma) in self.volatility.iter().enumerate() {
            let upper_node = self.volatility_time.get(i).copied().unwrap_or(f64::INFINITY);
            if upper_node <= lower {
                continue;
            }
            let upper = upper_node.min(end);
            if upper > lower {
                let piece = if a.abs() < SMALL_MEAN_REVERSION {
                    upper - lower
                } else {
                    ((2.0 * a * upper).exp() - (2.0 * a * lower).exp()) / (2.0 * a)
                };
                total += sigma * sigma * piece;
                lower = upper;
            }
            if upper >= end {
                break;
            }
        }
        total
    }

    /// `(e^(−a u) − e^(−a v)) / a`, with limit `v − u` as `a → 0`.
    pub fn bond_factor(&self, numeraire_time: f64, maturity: f64) -> f64 {
        let a = self.mean_reversion;
        if a.abs() < SMALL_MEAN_REVERSION {
            maturity - numeraire_time
        } else {
            ((-a * numeraire_time).exp() - (-a * maturity).exp()) / a
        }
    }

    /// Bond volatility factor α between `start` and `end` for the bond
    /// maturing at `maturity` under the `numeraire_time`-forward measure.
    pub fn alpha(&self, start: f64, end: f64, numeraire_time: f64, maturity: f64) -> f64 {
        self.bond_factor(numeraire_time, maturity) * self.gamma(start, end).sqrt()
    }
}
