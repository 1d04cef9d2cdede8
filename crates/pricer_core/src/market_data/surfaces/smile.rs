//! Black smile term structure quoted in delta.
//!
//! Each expiry carries an ATM volatility plus risk reversals and strangles
//! at a common set of deltas. Strikes are implied from the volatilities
//! and the forward at lookup time, so a volatility query needs the
//! forward as well as the expiry and strike.

use crate::market_data::curves::check_time;
use crate::market_data::error::MarketDataError;
use crate::math::distributions::norm_inv_cdf;

/// Smile at one expiry.
///
/// `volatility` holds `2n + 1` values for `n` deltas: the put wing at
/// indices `0..n` (smallest delta first), ATM at `n`, the call wing at
/// `n+1..=2n` (largest delta first).
///
/// # Example
///
/// ```
/// use pricer_core::market_data::SmileDeltaParameters;
///
/// let smile = SmileDeltaParameters::from_quotes(
///     0.5, 0.11, vec![0.10, 0.25], &[-0.02, -0.01], &[0.006, 0.002],
/// ).unwrap();
/// let vols = smile.volatility();
/// assert_eq!(vols.len(), 5);
/// assert!((vols[2] - 0.11).abs() < 1e-15);
/// assert!((vols[0] - (0.006 + 0.11 + 0.01)).abs() < 1e-15);
/// assert!((vols[4] - (0.006 + 0.11 - 0.01)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::market_data::raw::SmileDeltaParametersRaw")
)]
pub struct SmileDeltaParameters {
    time: f64,
    delta: Vec<f64>,
    volatility: Vec<f64>,
}

impl SmileDeltaParameters {
    /// Builds a smile from node volatilities.
    ///
    /// # Errors
    /// `MarketDataError::InvalidSmile` when the sizes disagree, a delta is
    /// outside (0, 0.5) or a volatility is not positive.
    pub fn new(time: f64, delta: Vec<f64>, volatility: Vec<f64>) -> Result<Self, MarketDataError> {
        check_time(time)?;
        if time == 0.0 {
            return Err(invalid("smile expiry must be positive"));
        }
        if volatility.len() != 2 * delta.len() + 1 {
            return Err(invalid(format!(
                "{} deltas need {} volatilities, got {}",
                delta.len(),
                2 * delta.len() + 1,
                volatility.len()
            )));
        }
        if delta.iter().any(|d| !(*d > 0.0 && *d < 0.5)) {
            return Err(invalid("deltas must lie in (0, 0.5)"));
        }
        if volatility.iter().any(|v| !(*v > 0.0)) {
            return Err(invalid("volatilities must be positive"));
        }
        Ok(Self {
            time,
            delta,
            volatility,
        })
    }

    /// Builds a smile from ATM, risk reversal and strangle quotes.
    ///
    /// `vol[n] = atm`, `vol[i] = strangle[i] + atm - rr[i] / 2`,
    /// `vol[2n - i] = strangle[i] + atm + rr[i] / 2`.
    pub fn from_quotes(
        time: f64,
        atm: f64,
        delta: Vec<f64>,
        risk_reversal: &[f64],
        strangle: &[f64],
    ) -> Result<Self, MarketDataError> {
        let n = delta.len();
        if risk_reversal.len() != n || strangle.len() != n {
            return Err(invalid(format!(
                "{} deltas with {} risk reversals and {} strangles",
                n,
                risk_reversal.len(),
                strangle.len()
            )));
        }
        let mut volatility = vec![atm; 2 * n + 1];
        for i in 0..n {
            volatility[i] = strangle[i] + atm - risk_reversal[i] / 2.0;
            volatility[2 * n - i] = strangle[i] + atm + risk_reversal[i] / 2.0;
        }
        Self::new(time, delta, volatility)
    }

    /// Expiry time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Deltas, ascending.
    #[inline]
    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    /// Node volatilities.
    #[inline]
    pub fn volatility(&self) -> &[f64] {
        &self.volatility
    }

    /// Strikes implied by the node volatilities at `forward`.
    pub fn strikes(&self, forward: f64) -> Vec<f64> {
        implied_strikes(&self.delta, &self.volatility, self.time, forward)
    }
}

/// Volatility and its derivatives with respect to every smile node.
#[derive(Debug, Clone, PartialEq)]
pub struct SmileVolatilityAdjoint {
    /// Interpolated volatility.
    pub volatility: f64,
    /// `∂vol/∂node[expiry][strike index]`.
    pub node_sensitivity: Vec<Vec<f64>>,
}

/// Term structure of delta smiles.
///
/// Between expiries, total variance `σ²t` is linear in time for each
/// strike index; outside the expiry range the nearest smile is used.
/// Across strikes the volatility is linear with flat extrapolation.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{SmileDeltaParameters, SmileDeltaTermStructure};
///
/// let smiles = vec![
///     SmileDeltaParameters::from_quotes(0.25, 0.10, vec![0.25], &[0.0], &[0.0]).unwrap(),
///     SmileDeltaParameters::from_quotes(1.0, 0.12, vec![0.25], &[0.0], &[0.0]).unwrap(),
/// ];
/// let surface = SmileDeltaTermStructure::new(smiles).unwrap();
/// let vol = surface.volatility(1.0, 1.3, 1.3).unwrap();
/// assert!((vol - 0.12).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::market_data::raw::SmileDeltaTermStructureRaw")
)]
pub struct SmileDeltaTermStructure {
    smiles: Vec<SmileDeltaParameters>,
}

impl SmileDeltaTermStructure {
    /// Builds a term structure.
    ///
    /// # Errors
    /// `MarketDataError::InvalidSmile` when empty, unsorted, or when the
    /// smiles do not share the same deltas.
    pub fn new(smiles: Vec<SmileDeltaParameters>) -> Result<Self, MarketDataError> {
        let first = smiles
            .first()
            .ok_or_else(|| invalid("at least one expiry is required"))?;
        if smiles.windows(2).any(|w| w[1].time <= w[0].time) {
            return Err(invalid("expiries must be strictly increasing"));
        }
        if smiles.iter().any(|s| s.delta != first.delta) {
            return Err(invalid("every expiry must use the same deltas"));
        }
        Ok(Self { smiles })
    }

    /// Smiles by expiry.
    #[inline]
    pub fn smiles(&self) -> &[SmileDeltaParameters] {
        &self.smiles
    }

    /// Number of deltas per wing.
    #[inline]
    pub fn number_of_deltas(&self) -> usize {
        self.smiles[0].delta.len()
    }

    /// Volatility at expiry `time`, `strike` and `forward`.
    pub fn volatility(&self, time: f64, strike: f64, forward: f64) -> Result<f64, MarketDataError> {
        Ok(self.volatility_adjoint(time, strike, forward)?.volatility)
    }

    /// Volatility and its node sensitivities.
    ///
    /// The derivative accounts for the strikes moving with the node
    /// volatilities.
    pub fn volatility_adjoint(
        &self,
        time: f64,
        strike: f64,
        forward: f64,
    ) -> Result<SmileVolatilityAdjoint, MarketDataError> {
        check_time(time)?;
        if time == 0.0 {
            return Err(MarketDataError::InvalidTime { t: time });
        }
        if !(strike > 0.0 && forward > 0.0) {
            return Err(invalid("strike and forward must be positive"));
        }
        let n_vol = self.smiles[0].volatility.len();

        // time weights: vol_j(T)² T = Σ_e w_e σ_{e,j}² t_e
        let weights = self.time_weights(time);
        let mut vol_t = vec![0.0; n_vol];
        for (j, v) in vol_t.iter_mut().enumerate() {
            let var: f64 = weights
                .iter()
                .map(|&(e, w)| {
                    let s = &self.smiles[e];
                    w * s.volatility[j] * s.volatility[j] * s.time
                })
                .sum();
            *v = (var / time).sqrt();
        }

        let delta = &self.smiles[0].delta;
        let strikes = implied_strikes(delta, &vol_t, time, forward);
        if strikes.windows(2).any(|w| w[1] <= w[0]) {
            return Err(invalid("implied strikes are not increasing"));
        }

        // strike interpolation with its adjoint w.r.t. vol_t
        let mut vol_t_bar = vec![0.0; n_vol];
        let volatility = if strike <= strikes[0] {
            vol_t_bar[0] = 1.0;
            vol_t[0]
        } else if strike >= strikes[n_vol - 1] {
            vol_t_bar[n_vol - 1] = 1.0;
            vol_t[n_vol - 1]
        } else {
            let l = strikes.partition_point(|&k| k <= strike) - 1;
            let dk = strikes[l + 1] - strikes[l];
            let x = (strike - strikes[l]) / dk;
            let slope = vol_t[l + 1] - vol_t[l];
            let dstrike = strike_derivatives(delta, &vol_t, &strikes, time);
            vol_t_bar[l] += 1.0 - x + slope * (x - 1.0) / dk * dstrike[l];
            vol_t_bar[l + 1] += x - slope * x / dk * dstrike[l + 1];
            vol_t[l] * (1.0 - x) + vol_t[l + 1] * x
        };

        let mut node_sensitivity = vec![vec![0.0; n_vol]; self.smiles.len()];
        for &(e, w) in &weights {
            let s = &self.smiles[e];
            for j in 0..n_vol {
                node_sensitivity[e][j] +=
                    vol_t_bar[j] * w * s.volatility[j] * s.time / (time * vol_t[j]);
            }
        }

        Ok(SmileVolatilityAdjoint {
            volatility,
            node_sensitivity,
        })
    }

    /// Expiry indices and total-variance weights bracketing `time`.
    ///
    /// Flat extrapolation keeps the volatility of the nearest smile, so the
    /// weight is rescaled by `time / t_e`.
    fn time_weights(&self, time: f64) -> Vec<(usize, f64)> {
        let last = self.smiles.len() - 1;
        if time <= self.smiles[0].time {
            return vec![(0, time / self.smiles[0].time)];
        }
        if time >= self.smiles[last].time {
            return vec![(last, time / self.smiles[last].time)];
        }
        let upper = self.smiles.partition_point(|s| s.time <= time);
        let (t0, t1) = (self.smiles[upper - 1].time, self.smiles[upper].time);
        let w1 = (time - t0) / (t1 - t0);
        vec![(upper - 1, 1.0 - w1), (upper, w1)]
    }
}

/// Strikes for node volatilities `vol` at `forward` and `time`.
fn implied_strikes(delta: &[f64], vol: &[f64], time: f64, forward: f64) -> Vec<f64> {
    let n = delta.len();
    let sqrt_t = time.sqrt();
    let mut strikes = vec![0.0; 2 * n + 1];
    strikes[n] = forward * (vol[n] * vol[n] * time / 2.0).exp();
    for (i, &d) in delta.iter().enumerate() {
        let q = norm_inv_cdf(d);
        let put = vol[i];
        let call = vol[2 * n - i];
        strikes[i] = forward * (put * sqrt_t * q + put * put * time / 2.0).exp();
        strikes[2 * n - i] = forward * (-call * sqrt_t * q + call * call * time / 2.0).exp();
    }
    strikes
}

/// `∂K_j/∂vol_j` for each strike index.
fn strike_derivatives(delta: &[f64], vol: &[f64], strikes: &[f64], time: f64) -> Vec<f64> {
    let n = delta.len();
    let sqrt_t = time.sqrt();
    let mut out = vec![0.0; 2 * n + 1];
    out[n] = strikes[n] * vol[n] * time;
    for (i, &d) in delta.iter().enumerate() {
        let q = norm_inv_cdf(d);
        out[i] = strikes[i] * (sqrt_t * q + vol[i] * time);
        out[2 * n - i] = strikes[2 * n - i] * (-sqrt_t * q + vol[2 * n - i] * time);
    }
    out
}

fn invalid(reason: impl Into<String>) -> MarketDataError {
    MarketDataError::InvalidSmile {
        reason: reason.into(),
    }
}
