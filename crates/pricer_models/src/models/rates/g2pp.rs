//! G2++ two-factor Gaussian model with piecewise-constant volatilities.
//!
//! The short rate is `r(t) = x₁(t) + x₂(t) + φ(t)` with
//! ```text
//! dx_k = −a_k x_k dt + sigma_k(t) dW_k,   d⟨W₁, W₂⟩ = ρ dt
//! ```
//! Under the θ-forward measure
//! ```text
//! P(θ, t) = P(0, t) / P(0, θ) · exp(−H(t)·X − ½ H(t)ᵀ Γ H(t))
//! ```
//! where `X ~ N(0, Γ)`, `H_k(t) = (e^(−a_k θ) − e^(−a_k t)) / a_k` and
//! `Γ_kl = ρ_kl ∫_0^θ sigma_k(s) sigma_l(s) e^((a_k + a_l) s) ds`.

use crate::models::error::{check_increasing, check_range, ModelError};

const SMALL_MEAN_REVERSION: f64 = 1e-10;

/// G2++ parameters.
///
/// Both volatility vectors share one change-time grid, with the same
/// convention as [`HullWhiteParameters`](super::HullWhiteParameters).
///
/// # Example
///
/// ```
/// use pricer_models::models::G2ppParameters;
///
/// let params = G2ppParameters::new(
///     [0.01, 0.30],
///     [vec![0.010, 0.011], vec![0.005, 0.006]],
///     vec![5.0],
///     -0.30,
/// ).unwrap();
/// let gamma = params.gamma(0.0, 2.0);
/// assert!(gamma[0][1] < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::models::raw::G2ppParametersRaw")
)]
pub struct G2ppParameters {
    mean_reversion: [f64; 2],
    volatility: [Vec<f64>; 2],
    volatility_time: Vec<f64>,
    correlation: f64,
}

impl G2ppParameters {
    /// Creates the parameters.
    ///
    /// # Errors
    /// Invalid mean reversions, negative volatilities, a correlation
    /// outside `[−1, 1]`, or a malformed volatility grid.
    pub fn new(
        mean_reversion: [f64; 2],
        volatility: [Vec<f64>; 2],
        volatility_time: Vec<f64>,
        correlation: f64,
    ) -> Result<Self, ModelError> {
        for a in mean_reversion {
            if !a.is_finite() {
                return Err(ModelError::InvalidParameter {
                    name: "mean reversion",
                    value: a,
                });
            }
        }
        check_range("correlation", correlation, -1.0, 1.0)?;
        for vols in &volatility {
            if let Some(v) = vols.iter().find(|v| !(**v >= 0.0 && v.is_finite())) {
                return Err(ModelError::InvalidParameter {
                    name: "volatility",
                    value: *v,
                });
            }
            if vols.len() != volatility_time.len() + 1 {
                return Err(ModelError::InvalidGrid(format!(
                    "{} volatilities need {} change times, got {}",
                    vols.len(),
                    vols.len().saturating_sub(1),
                    volatility_time.len()
                )));
            }
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
            correlation,
        })
    }

    /// Mean reversions `(a₁, a₂)`.
    pub fn mean_reversion(&self) -> [f64; 2] {
        self.mean_reversion
    }

    /// Volatility levels of factor `k` (0 or 1).
    pub fn volatility(&self, k: usize) -> &[f64] {
        &self.volatility[k]
    }

    /// Interior volatility change times.
    pub fn volatility_time(&self) -> &[f64] {
        &self.volatility_time
    }

    /// Factor correlation ρ.
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Factor covariance `Γ` accumulated between `start` and `end`.
    pub fn gamma(&self, start: f64, end: f64) -> [[f64; 2]; 2] {
        let mut gamma = [[0.0; 2]; 2];
        if end <= start {
            return gamma;
        }
        let a = self.mean_reversion;
        let mut lower = start;
        for i in 0..self.volatility[0].len() {
            let upper_node = self.volatility_time.get(i).copied().unwrap_or(f64::INFINITY);
            if upper_node <= lower {
                continue;
            }
            let upper = upper_node.min(end);
            if upper > lower {
                for k in 0..2 {
                    for l in 0..2 {
                        let rate = a[k] + a[l];
                        let piece = if rate.abs() < SMALL_MEAN_REVERSION {
                            upper - lower
                        } else {
                            ((rate * upper).exp() - (rate * lower).exp()) / rate
                        };
                        gamma[k][l] += self.volatility[k][i] * self.volatility[l][i] * piece;
                    }
                }
                lower = upper;
            }
            if upper >= end {
                break;
            }
        }
        gamma[0][1] *= self.correlation;
        gamma[1][0] *= self.correlation;
        gamma
    }

    /// `H_k = (e^(−a_k θ) − e^(−a_k t)) / a_k` for both factors.
    pub fn bond_factor(&self, numeraire_time: f64, maturity: f64) -> [f64; 2] {
        self.mean_reversion.map(|a| {
            if a.abs() < SMALL_MEAN_REVERSION {
                maturity - numeraire_time
            } else {
                ((-a * numeraire_time).exp() - (-a * maturity).exp()) / a
            }
        })
    }
}
