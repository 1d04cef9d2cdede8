//! SABR stochastic volatility model.
//!
//! The SABR (Stochastic Alpha, Beta, Rho) model is described by:
//! ```text
//! dF = alpha * F^beta * dW_F
//! d(alpha) = nu * alpha * dW_alpha
//! E[dW_F * dW_alpha] = rho * dt
//! ```
//!
//! ## Hagan formula
//!
//! Implied Black volatility from Hagan et al. (2002):
//! ```text
//! σ_B(K,F) = α / [(FK)^((1-β)/2) * D(F/K)]
//!            × (z/x(z))
//!            × [1 + (q1 + q2 + q3) * T]
//! ```
//! where:
//! - D(F/K) = 1 + ((1-β)²/24)*ln²(F/K) + ((1-β)⁴/1920)*ln⁴(F/K)
//! - z = (ν/α)*(FK)^((1-β)/2)*ln(F/K)
//! - x(z) = ln((√(1-2ρz+z²)+z-ρ)/(1-ρ))
//! - q1 = (1-β)²α²/(24(FK)^(1-β)), q2 = ρβνα/(4(FK)^((1-β)/2)), q3 = (2-3ρ²)ν²/24
//!
//! Near the money `z/x(z)` is replaced by its expansion `1 − ρz/2`.
//!
//! ## Example
//!
//! ```
//! use pricer_models::models::SabrParameters;
//!
//! let params = SabrParameters::new(0.05, 0.5, -0.25, 0.50).unwrap();
//! let vol = params.volatility(0.03, 0.035, 5.0).unwrap();
//! assert!(vol > 0.0);
//! ```

use super::error::{check_increasing, check_range, ModelError};
use super::jet::Jet;

/// Below this |z| the ratio z/x(z) uses its expansion.
const SMALL_Z: f64 = 1e-6;

/// SABR parameters for one expiry and tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::models::raw::SabrParametersRaw")
)]
pub struct SabrParameters {
    alpha: f64,
    beta: f64,
    rho: f64,
    nu: f64,
}

/// Volatility with its derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SabrVolatilityAdjoint {
    /// Implied Black volatility.
    pub volatility: f64,
    /// ∂σ/∂F
    pub forward: f64,
    /// ∂σ/∂K
    pub strike: f64,
    /// ∂σ/∂α
    pub alpha: f64,
    /// ∂σ/∂ρ
    pub rho: f64,
    /// ∂σ/∂ν
    pub nu: f64,
}

impl SabrParameters {
    /// Creates SABR parameters.
    ///
    /// # Errors
    /// `ModelError::InvalidParameter` unless α > 0, β ∈ [0, 1],
    /// ρ ∈ (−1, 1) and ν ≥ 0.
    pub fn new(alpha: f64, beta: f64, rho: f64, nu: f64) -> Result<Self, ModelError> {
        if !(alpha > 0.0 && alpha.is_finite()) {
            return Err(ModelError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        check_range("beta", beta, 0.0, 1.0)?;
        if !(rho > -1.0 && rho < 1.0) {
            return Err(ModelError::InvalidParameter {
                name: "rho",
                value: rho,
            });
        }
        check_range("nu", nu, 0.0, f64::MAX)?;
        Ok(Self {
            alpha,
            beta,
            rho,
            nu,
        })
    }

    /// Initial volatility α.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// CEV exponent β.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Correlation ρ.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Volatility of volatility ν.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Implied Black volatility.
    ///
    /// # Errors
    /// `ModelError::InvalidParameter` for a non-positive forward or strike.
    pub fn volatility(&self, forward: f64, strike: f64, expiry: f64) -> Result<f64, ModelError> {
        Ok(self.volatility_adjoint(forward, strike, expiry)?.volatility)
    }

    /// Implied Black volatility and its derivatives, by a backward sweep
    /// through the Hagan formula.
    pub fn volatility_adjoint(
        &self,
        forward: f64,
        strike: f64,
        expiry: f64,
    ) -> Result<SabrVolatilityAdjoint, ModelError> {
        check_rates(forward, strike)?;
        let (alpha, beta, rho, nu) = (self.alpha, self.beta, self.rho, self.nu);
        let b = 1.0 - beta;

        // forward sweep
        let fk = forward * strike;
        let sf = fk.powf(0.5 * b);
        let lfk = (forward / strike).ln();
        let lfk2 = lfk * lfk;
        let b2 = b * b;
        let denom = 1.0 + b2 / 24.0 * lfk2 + b2 * b2 / 1920.0 * lfk2 * lfk2;
        let z = nu / alpha * sf * lfk;

        let (zxz, dzxz_dz, dzxz_drho) = if z.abs() < SMALL_Z {
            (1.0 - 0.5 * rho * z, -0.5 * rho, -0.5 * z)
        } else {
            let r = (1.0 - 2.0 * rho * z + z * z).sqrt();
            let u = r + z - rho;
            let xz = (((z * z - 2.0 * rho * z) / (r + 1.0) + z) / (1.0 - rho)).ln_1p();
            let dxz_dz = 1.0 / r;
            let dxz_drho = -(z + r) / (r * u) + 1.0 / (1.0 - rho);
            let zxz = z / xz;
            (
                zxz,
                1.0 / xz - z * dxz_dz / (xz * xz),
                -z * dxz_drho / (xz * xz),
            )
        };

        let a = alpha / (sf * denom);
        let q1 = b2 * alpha * alpha / (24.0 * sf * sf);
        let q2 = rho * beta * nu * alpha / (4.0 * sf);
        let q3 = (2.0 - 3.0 * rho * rho) * nu * nu / 24.0;
        let corr = 1.0 + expiry * (q1 + q2 + q3);
        let volatility = a * zxz * corr;

        // backward sweep
        let a_bar = zxz * corr;
        let zxz_bar = a * corr;
        let q_bar = a * zxz * expiry;

        let mut alpha_bar = a_bar * a / alpha + q_bar * (2.0 * q1 / alpha) + q_bar * q2 / alpha;
        let mut sf_bar = -a_bar * a / sf - q_bar * 2.0 * q1 / sf - q_bar * q2 / sf;
        let denom_bar = -a_bar * a / denom;
        let mut rho_bar = q_bar * beta * nu * alpha / (4.0 * sf) - q_bar * rho * nu * nu / 4.0;
        let mut nu_bar =
            q_bar * rho * beta * alpha / (4.0 * sf) + q_bar * (2.0 - 3.0 * rho * rho) * nu / 12.0;

        let z_bar = zxz_bar * dzxz_dz;
        rho_bar += zxz_bar * dzxz_drho;

        nu_bar += z_bar * sf * lfk / alpha;
        alpha_bar -= z_bar * z / alpha;
        sf_bar += z_bar * nu * lfk / alpha;
        let mut lfk_bar = z_bar * nu * sf / alpha;

        lfk_bar += denom_bar * (b2 / 12.0 * lfk + b2 * b2 / 480.0 * lfk2 * lfk);
        let fk_bar = sf_bar * 0.5 * b * sf / fk;

        Ok(SabrVolatilityAdjoint {
            volatility,
            forward: lfk_bar / forward + fk_bar * strike,
            strike: -lfk_bar / strike + fk_bar * forward,
            alpha: alpha_bar,
            rho: rho_bar,
            nu: nu_bar,
        })
    }

    /// Implied volatility with its first and second strike derivatives.
    ///
    /// # Errors
    /// `ModelError::InvalidParameter` for a non-positive forward or strike.
    pub fn volatility_strike_derivatives(
        &self,
        forward: f64,
        strike: f64,
        expiry: f64,
    ) -> Result<[f64; 3], ModelError> {
        check_rates(forward, strike)?;
        let vol = hagan_jet(
            Jet::constant(forward),
            Jet::strike(strike),
            Jet::constant(self.alpha),
            self.beta,
            Jet::constant(self.rho),
            Jet::constant(self.nu),
            expiry,
        );
        Ok([vol.value.value, vol.value.d1, vol.value.d2])
    }
}

fn check_rates(forward: f64, strike: f64) -> Result<(), ModelError> {
    if !(forward > 0.0 && forward.is_finite()) {
        return Err(ModelError::InvalidParameter {
            name: "forward",
            value: forward,
        });
    }
    if !(strike > 0.0 && strike.is_finite()) {
        return Err(ModelError::InvalidParameter {
            name: "strike",
            value: strike,
        });
    }
    Ok(())
}

/// Hagan volatility on jets, for positive forward and strike.
pub(crate) fn hagan_jet(
    forward: Jet,
    strike: Jet,
    alpha: Jet,
    beta: f64,
    rho: Jet,
    nu: Jet,
    expiry: f64,
) -> Jet {
    let b = 1.0 - beta;
    let b2 = b * b;
    let sf = (forward * strike).powf(0.5 * b);
    let lfk = (forward / strike).ln();
    let lfk2 = lfk * lfk;
    let denom = 1.0 + lfk2 * (b2 / 24.0) + lfk2 * lfk2 * (b2 * b2 / 1920.0);
    let z = nu / alpha * sf * lfk;
    let zxz = if z.re().abs() < SMALL_Z {
        1.0 - 0.5 * rho * z
    } else {
        let r = (1.0 - 2.0 * rho * z + z * z).sqrt();
        let xz = (((z * z - 2.0 * rho * z) / (r + 1.0) + z) / (1.0 - rho)).ln_1p();
        z / xz
    };
    let a = alpha / (sf * denom);
    let q1 = b2 * alpha * alpha / (24.0 * sf * sf);
    let q2 = beta * rho * nu * alpha / (4.0 * sf);
    let q3 = (2.0 - 3.0 * rho * rho) * nu * nu / 24.0;
    let corr = 1.0 + (q1 + q2 + q3) * expiry;
    a * zxz * corr
}

/// SABR parameter that can be bumped on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SabrParameter {
    /// α
    Alpha,
    /// ρ
    Rho,
    /// ν
    Nu,
}

/// SABR parameters on an (expiry, tenor) grid with a single β.
///
/// Values are interpolated bilinearly between nodes and extrapolated flat.
/// Grids are strictly increasing; value matrices are indexed
/// `[expiry][tenor]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::models::raw::SabrParameterSurfaceRaw")
)]
pub struct SabrParameterSurface {
    expiries: Vec<f64>,
    tenors: Vec<f64>,
    alpha: Vec<Vec<f64>>,
    beta: f64,
    rho: Vec<Vec<f64>>,
    nu: Vec<Vec<f64>>,
}

impl SabrParameterSurface {
    /// Creates a parameter surface.
    ///
    /// # Errors
    /// Malformed grids, matrix shapes that do not match them, or node
    /// values outside the parameter domain.
    pub fn new(
        expiries: Vec<f64>,
        tenors: Vec<f64>,
        alpha: Vec<Vec<f64>>,
        beta: f64,
        rho: Vec<Vec<f64>>,
        nu: Vec<Vec<f64>>,
    ) -> Result<Self, ModelError> {
        if expiries.is_empty() || tenors.is_empty() {
            return Err(ModelError::InvalidGrid("empty expiry or tenor grid".to_string()));
        }
        check_increasing("expiry grid", &expiries)?;
        check_increasing("tenor grid", &tenors)?;
        for (name, values) in [("alpha", &alpha), ("rho", &rho), ("nu", &nu)] {
            if values.len() != expiries.len()
                || values.iter().any(|row| row.len() != tenors.len())
            {
                return Err(ModelError::InvalidGrid(format!(
                    "{} values do not match the {}x{} grid",
                    name,
                    expiries.len(),
                    tenors.len()
                )));
            }
        }
        for ((a_row, r_row), n_row) in alpha.iter().zip(&rho).zip(&nu) {
            for ((a, r), n) in a_row.iter().zip(r_row).zip(n_row) {
                SabrParameters::new(*a, beta, *r, *n)?;
            }
        }
        Ok(Self {
            expiries,
            tenors,
            alpha,
            beta,
            rho,
            nu,
        })
    }

    /// Surface with the same parameters everywhere.
    pub fn constant(parameters: SabrParameters) -> Self {
        Self {
            expiries: vec![0.0],
            tenors: vec![0.0],
            alpha: vec![vec![parameters.alpha]],
            beta: parameters.beta,
            rho: vec![vec![parameters.rho]],
            nu: vec![vec![parameters.nu]],
        }
    }

    /// Expiry grid.
    pub fn expiries(&self) -> &[f64] {
        &self.expiries
    }

    /// Tenor grid.
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// β shared by the surface.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Interpolated parameters at (expiry, tenor).
    pub fn parameters(&self, expiry: f64, tenor: f64) -> Result<SabrParameters, ModelError> {
        let (i0, i1, wx) = bracket(&self.expiries, expiry);
        let (j0, j1, wy) = bracket(&self.tenors, tenor);
        let interp = |m: &[Vec<f64>]| {
            let low = m[i0][j0] * (1.0 - wy) + m[i0][j1] * wy;
            let high = m[i1][j0] * (1.0 - wy) + m[i1][j1] * wy;
            low * (1.0 - wx) + high * wx
        };
        SabrParameters::new(
            interp(&self.alpha),
            self.beta,
            interp(&self.rho),
            interp(&self.nu),
        )
    }

    /// Same surface with `shift` added to every node of one parameter.
    pub fn with_parallel_shift(&self, parameter: SabrParameter, shift: f64) -> Self {
        let bump = |m: &[Vec<f64>]| -> Vec<Vec<f64>> {
            m.iter()
                .map(|row| row.iter().map(|v| v + shift).collect())
                .collect()
        };
        let mut shifted = self.clone();
        match parameter {
            SabrParameter::Alpha => shifted.alpha = bump(&self.alpha),
            SabrParameter::Rho => shifted.rho = bump(&self.rho),
            SabrParameter::Nu => shifted.nu = bump(&self.nu),
        }
        shifted
    }
}

/// Bracketing indices and weight of the upper node, flat outside the grid.
fn bracket(grid: &[f64], x: f64) -> (usize, usize, f64) {
    let last = grid.len() - 1;
    if x <= grid[0] {
        return (0, 0, 0.0);
    }
    if x >= grid[last] {
        return (last, last, 0.0);
    }
    let upper = grid.partition_point(|g| *g <= x);
    let lower = upper - 1;
    let w = (x - grid[lower]) / (grid[upper] - grid[lower]);
    (lower, upper, w)
}
