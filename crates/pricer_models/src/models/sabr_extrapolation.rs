//! SABR prices with a right-tail extrapolation.
//!
//! Below the cutoff strike `x` the price is Black with the SABR volatility.
//! Above it the call price is
//! ```text
//! C(K) = K^(-μ) · exp(a + b/K + c/K²)
//! ```
//! with `(a, b, c)` chosen so that the price and its first two strike
//! derivatives match the SABR price at `x`. Puts above the cutoff follow
//! from put-call parity on the forward. The tail parameter `μ` controls
//! how fast the call price decays.

use crate::analytical::Black;

use super::error::ModelError;
use super::jet::Jet;
use super::sabr::{hagan_jet, SabrParameters};

/// SABR pricer with right-tail extrapolation, for one forward and expiry.
///
/// # Example
///
/// ```
/// use pricer_models::models::{SabrExtrapolationRight, SabrParameters};
///
/// let params = SabrParameters::new(0.05, 0.5, -0.25, 0.5).unwrap();
/// let pricer = SabrExtrapolationRight::new(0.05, params, 5.0, 0.10, 10.0).unwrap();
/// let inside = pricer.price(0.06, true).unwrap();
/// let tail = pricer.price(0.20, true).unwrap();
/// assert!(inside > tail && tail > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SabrExtrapolationRight {
    forward: f64,
    parameters: SabrParameters,
    expiry: f64,
    cutoff_strike: f64,
    mu: f64,
    coefficients: [f64; 3],
}

/// Price with derivatives with respect to forward and SABR parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SabrPriceAdjoint {
    /// Undiscounted price.
    pub price: f64,
    /// ∂P/∂F
    pub forward: f64,
    /// ∂P/∂α
    pub alpha: f64,
    /// ∂P/∂ρ
    pub rho: f64,
    /// ∂P/∂ν
    pub nu: f64,
}

impl SabrExtrapolationRight {
    /// Fits the tail at the cutoff strike.
    ///
    /// # Errors
    /// - `ModelError::InvalidParameter` for a non-positive forward, expiry,
    ///   cutoff or tail parameter
    /// - `ModelError::NumericalInstability` if the SABR price at the cutoff
    ///   is not positive
    pub fn new(
        forward: f64,
        parameters: SabrParameters,
        expiry: f64,
        cutoff_strike: f64,
        mu: f64,
    ) -> Result<Self, ModelError> {
        for (name, value) in [
            ("forward", forward),
            ("expiry", expiry),
            ("cutoff strike", cutoff_strike),
            ("mu", mu),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ModelError::InvalidParameter { name, value });
            }
        }
        let coefficients = fit_tail(forward, &parameters, expiry, cutoff_strike, mu)?;
        Ok(Self {
            forward,
            parameters,
            expiry,
            cutoff_strike,
            mu,
            coefficients,
        })
    }

    /// Forward.
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// SABR parameters.
    pub fn parameters(&self) -> &SabrParameters {
        &self.parameters
    }

    /// Cutoff strike.
    pub fn cutoff_strike(&self) -> f64 {
        self.cutoff_strike
    }

    /// Tail parameter μ.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Tail coefficients `(a, b, c)`.
    pub fn coefficients(&self) -> [f64; 3] {
        self.coefficients
    }

    /// Undiscounted option price.
    pub fn price(&self, strike: f64, is_call: bool) -> Result<f64, ModelError> {
        if strike <= self.cutoff_strike {
            return sabr_black_price(self.forward, &self.parameters, strike, self.expiry, is_call);
        }
        let call = tail_price(self.coefficients, self.mu, strike);
        Ok(if is_call {
            call
        } else {
            call - (self.forward - strike)
        })
    }

    /// Price and its derivatives with respect to the forward and the SABR
    /// parameters.
    ///
    /// In the tail the fit equations are linear in `(a, b, c)`, so their
    /// derivatives solve the same system against the derivatives of the
    /// cutoff price and its strike derivatives.
    pub fn price_adjoint(
        &self,
        strike: f64,
        is_call: bool,
    ) -> Result<SabrPriceAdjoint, ModelError> {
        if strike <= self.cutoff_strike {
            return sabr_black_price_adjoint(
                self.forward,
                &self.parameters,
                strike,
                self.expiry,
                is_call,
            );
        }

        let call = tail_price(self.coefficients, self.mu, strike);
        let tail_sensitivity = |direction: Direction| {
            let d = self.coefficient_derivatives(direction);
            call * (d[0] + d[1] / strike + d[2] / (strike * strike))
        };
        let dcall_dforward = tail_sensitivity(Direction::Forward);
        Ok(SabrPriceAdjoint {
            price: if is_call {
                call
            } else {
                call - (self.forward - strike)
            },
            forward: if is_call {
                dcall_dforward
            } else {
                dcall_dforward - 1.0
            },
            alpha: tail_sensitivity(Direction::Alpha),
            rho: tail_sensitivity(Direction::Rho),
            nu: tail_sensitivity(Direction::Nu),
        })
    }

    /// Derivatives of `(a, b, c)` along one input.
    fn coefficient_derivatives(&self, direction: Direction) -> [f64; 3] {
        let jet = cutoff_price(
            self.forward,
            &self.parameters,
            self.expiry,
            self.cutoff_strike,
            direction,
        );
        let (c, dc) = (jet.value, jet.tangent);
        let f1 = c.d1 / c.value;
        let df0 = dc.value / c.value;
        let df1 = dc.d1 / c.value - f1 * df0;
        let df2 = dc.d2 / c.value - c.d2 / c.value * df0 - 2.0 * f1 * df1;
        solve_tail(self.cutoff_strike, [df0, df1, df2])
    }
}

/// Input along which the cutoff price is differentiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Fixed,
    Forward,
    Alpha,
    Rho,
    Nu,
}

fn tail_price(coefficients: [f64; 3], mu: f64, strike: f64) -> f64 {
    let [a, b, c] = coefficients;
    strike.powf(-mu) * (a + b / strike + c / (strike * strike)).exp()
}

/// Black price with the SABR volatility.
fn sabr_black_price(
    forward: f64,
    parameters: &SabrParameters,
    strike: f64,
    expiry: f64,
    is_call: bool,
) -> Result<f64, ModelError> {
    Ok(sabr_black_price_adjoint(forward, parameters, strike, expiry, is_call)?.price)
}

fn sabr_black_price_adjoint(
    forward: f64,
    parameters: &SabrParameters,
    strike: f64,
    expiry: f64,
    is_call: bool,
) -> Result<SabrPriceAdjoint, ModelError> {
    if strike <= 0.0 {
        let black = black(forward, 0.0)?;
        let intrinsic = black.price_adjoint(strike, expiry, is_call);
        return Ok(SabrPriceAdjoint {
            price: intrinsic.price,
            forward: intrinsic.forward,
            alpha: 0.0,
            rho: 0.0,
            nu: 0.0,
        });
    }
    let vol = parameters.volatility_adjoint(forward, strike, expiry)?;
    let price = black(forward, vol.volatility)?.price_adjoint(strike, expiry, is_call);
    Ok(SabrPriceAdjoint {
        price: price.price,
        forward: price.forward + price.volatility * vol.forward,
        alpha: price.volatility * vol.alpha,
        rho: price.volatility * vol.rho,
        nu: price.volatility * vol.nu,
    })
}

fn black(forward: f64, volatility: f64) -> Result<Black, ModelError> {
    Black::new(forward, volatility).map_err(|e| ModelError::NumericalInstability(e.to_string()))
}

/// SABR call price at the cutoff with its first two strike derivatives,
/// and their derivatives along `direction`.
fn cutoff_price(
    forward: f64,
    parameters: &SabrParameters,
    expiry: f64,
    cutoff: f64,
    direction: Direction,
) -> Jet {
    let input = |along: Direction, value: f64| {
        if along == direction {
            Jet::seeded(value)
        } else {
            Jet::constant(value)
        }
    };
    let f = input(Direction::Forward, forward);
    let k = Jet::strike(cutoff);
    let vol = hagan_jet(
        f,
        k,
        input(Direction::Alpha, parameters.alpha()),
        parameters.beta(),
        input(Direction::Rho, parameters.rho()),
        input(Direction::Nu, parameters.nu()),
        expiry,
    );
    let std_dev = vol * expiry.sqrt();
    let d1 = (f / k).ln() / std_dev + 0.5 * std_dev;
    let d2 = d1 - std_dev;
    f * d1.norm_cdf() - k * d2.norm_cdf()
}

/// Solves `a + b/x + c/x² = g₀`, `−b/x² − 2c/x³ = g₁` and
/// `2b/x³ + 6c/x⁴ = g₂` for `(a, b, c)`.
fn solve_tail(x: f64, g: [f64; 3]) -> [f64; 3] {
    let c = x.powi(4) * (g[2] + 2.0 * g[1] / x) / 2.0;
    let b = -x * x * g[1] - 2.0 * c / x;
    let a = g[0] - b / x - c / (x * x);
    [a, b, c]
}

/// Solves for `(a, b, c)` from the SABR call price and its first two
/// strike derivatives at the cutoff.
fn fit_tail(
    forward: f64,
    parameters: &SabrParameters,
    expiry: f64,
    cutoff: f64,
    mu: f64,
) -> Result<[f64; 3], ModelError> {
    let price = cutoff_price(forward, parameters, expiry, cutoff, Direction::Fixed).value;
    let c0 = price.value;
    if !(c0 > 0.0 && c0.is_finite()) {
        return Err(ModelError::NumericalInstability(format!(
            "SABR price at cutoff {} is {}",
            cutoff, c0
        )));
    }
    let x = cutoff;
    let f1 = price.d1 / c0;
    let f2 = price.d2 / c0 - f1 * f1;
    let coefficients = solve_tail(x, [c0.ln() + mu * x.ln(), f1 + mu / x, f2 - mu / (x * x)]);
    if !coefficients.iter().all(|v| v.is_finite()) {
        return Err(ModelError::NumericalInstability(
            "non-finite tail coefficients".to_string(),
        ));
    }
    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const F: f64 = 0.05;
    const T: f64 = 5.0;
    const CUTOFF: f64 = 0.10;
    const MU: f64 = 10.0;

    fn params() -> SabrParameters {
        SabrParameters::new(0.05, 0.5, -0.25, 0.50).unwrap()
    }

    fn pricer() -> SabrExtrapolationRight {
        SabrExtrapolationRight::new(F, params(), T, CUTOFF, MU).unwrap()
    }

    // ==========================================================
    // Fit
    // ==========================================================

    #[test]
    fn test_below_cutoff_is_sabr_black() {
        let vol = params().volatility(F, 0.07, T).unwrap();
        let expected = Black::new(F, vol).unwrap().price(0.07, T, true);
        assert_relative_eq!(pricer().price(0.07, true).unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_price_and_slope_continuous_at_cutoff() {
        let p = pricer();
        let eps = 1e-10;
        let below = p.price(CUTOFF - eps, true).unwrap();
        let above = p.price(CUTOFF + eps, true).unwrap();
        assert_relative_eq!(below, above, max_relative = 1e-5);

        let h = 1e-5;
        let slope_below = (p.price(CUTOFF, true).unwrap() - p.price(CUTOFF - h, true).unwrap()) / h;
        let slope_above =
            (p.price(CUTOFF + h, true).unwrap() - p.price(CUTOFF + 1e-12, true).unwrap()) / h;
        assert_relative_eq!(slope_below, slope_above, max_relative = 1e-2);
    }

    #[test]
    fn test_tail_decreases_to_zero() {
        let p = pricer();
        let mut previous = p.price(CUTOFF + 0.01, true).unwrap();
        for k in [0.15, 0.2, 0.5, 1.0] {
            let price = p.price(k, true).unwrap();
            assert!(price > 0.0 && price < previous);
            previous = price;
        }
        assert!(p.price(10.0, true).unwrap() < 1e-12);
    }

    #[test]
    fn test_put_call_parity_in_tail() {
        let p = pricer();
        let k = 0.2;
        let parity = p.price(k, true).unwrap() - p.price(k, false).unwrap();
        assert_relative_eq!(parity, F - k, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(SabrExtrapolationRight::new(F, params(), 0.0, CUTOFF, MU).is_err());
        assert!(SabrExtrapolationRight::new(F, params(), T, CUTOFF, -1.0).is_err());
    }

    // ==========================================================
    // Adjoint
    // ==========================================================

    fn bumped_price(forward: f64, alpha: f64, rho: f64, nu: f64, k: f64, is_call: bool) -> f64 {
        let p = SabrParameters::new(alpha, 0.5, rho, nu).unwrap();
        SabrExtrapolationRight::new(forward, p, T, CUTOFF, MU)
            .unwrap()
            .price(k, is_call)
            .unwrap()
    }

    #[test]
    fn test_adjoint_matches_finite_difference() {
        let h = 1e-6;
        let (a, r, n) = (0.05, -0.25, 0.50);
        for k in [0.03, 0.09, 0.12, 0.25] {
            for is_call in [true, false] {
                let adj = pricer().price_adjoint(k, is_call).unwrap();
                let price = pricer().price(k, is_call).unwrap();
                assert_relative_eq!(adj.price, price, epsilon = 1e-15);
                let df = (bumped_price(F + h, a, r, n, k, is_call)
                    - bumped_price(F - h, a, r, n, k, is_call))
                    / (2.0 * h);
                let da = (bumped_price(F, a + h, r, n, k, is_call)
                    - bumped_price(F, a - h, r, n, k, is_call))
                    / (2.0 * h);
                let dr = (bumped_price(F, a, r + h, n, k, is_call)
                    - bumped_price(F, a, r - h, n, k, is_call))
                    / (2.0 * h);
                let dn = (bumped_price(F, a, r, n + h, k, is_call)
                    - bumped_price(F, a, r, n - h, k, is_call))
                    / (2.0 * h);
                assert_relative_eq!(adj.forward, df, epsilon = 1e-7, max_relative = 1e-4);
                assert_relative_eq!(adj.alpha, da, epsilon = 1e-7, max_relative = 1e-4);
                assert_relative_eq!(adj.rho, dr, epsilon = 1e-7, max_relative = 1e-4);
                assert_relative_eq!(adj.nu, dn, epsilon = 1e-7, max_relative = 1e-4);
            }
        }
    }

    #[test]
    fn test_coefficient_derivatives_match_refit() {
        let h = 1e-6;
        let base = pricer();
        let refit = |forward: f64, alpha: f64, rho: f64, nu: f64| {
            let p = SabrParameters::new(alpha, 0.5, rho, nu).unwrap();
            SabrExtrapolationRight::new(forward, p, T, CUTOFF, MU)
                .unwrap()
                .coefficients()
        };
        let (a, r, n) = (0.05, -0.25, 0.50);
        let cases = [
            (Direction::Forward, refit(F + h, a, r, n), refit(F - h, a, r, n)),
            (Direction::Alpha, refit(F, a + h, r, n), refit(F, a - h, r, n)),
            (Direction::Rho, refit(F, a, r + h, n), refit(F, a, r - h, n)),
            (Direction::Nu, refit(F, a, r, n + h), refit(F, a, r, n - h)),
        ];
        for (direction, up, down) in cases {
            let analytic = base.coefficient_derivatives(direction);
            for i in 0..3 {
                let fd = (up[i] - down[i]) / (2.0 * h);
                assert_relative_eq!(analytic[i], fd, epsilon = 1e-4, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_cutoff_strike_derivatives_match_sabr_black() {
        let price = |k: f64| {
            let vol = params().volatility(F, k, T).unwrap();
            Black::new(F, vol).unwrap().price(k, T, true)
        };
        let h = 1e-5;
        let jet = cutoff_price(F, &params(), T, CUTOFF, Direction::Fixed).value;
        assert_relative_eq!(jet.value, price(CUTOFF), max_relative = 1e-12);
        let fd_slope = (price(CUTOFF + h) - price(CUTOFF - h)) / (2.0 * h);
        let fd_curvature = (price(CUTOFF + h) - 2.0 * price(CUTOFF) + price(CUTOFF - h)) / (h * h);
        assert_relative_eq!(jet.d1, fd_slope, max_relative = 1e-7);
        assert_relative_eq!(jet.d2, fd_curvature, max_relative = 1e-4);
    }

    #[test]
    fn test_fixed_direction_has_no_tangent() {
        let jet = cutoff_price(F, &params(), T, CUTOFF, Direction::Fixed);
        assert_eq!(jet.tangent, Default::default());
    }
}
