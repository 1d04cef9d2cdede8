//! Hull-White one-factor method for European swaptions.
//!
//! Under the forward measure at `θ₀` every bond ratio is
//! `P(θ, t)/P(θ, θ₀) = P(0, t)/P(0, θ₀)·exp(−αX − α²/2)` with a single
//! standard normal `X`, so the swaption payoff is a function of one
//! Gaussian factor.
//!
//! - Physical delivery: the swap value is a sum of such bond ratios and
//!   the option splits into bond options around the exercise boundary.
//! - Cash settlement: the payoff `|N|·Â(S)·(ω(S − K))⁺` is integrated
//!   over the exercise region, or expanded to third order in `X` around
//!   the boundary and integrated in closed form.

use pricer_core::market_data::CurveBundle;
use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::math::integration::{simpson, simpson_nodes};
use pricer_core::math::solvers::BrentSolver;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{CurrencyAmount, PricingError, PricingResult};
use pricer_models::instruments::rates::{SwaptionCash, SwaptionPhysical};
use pricer_models::models::HullWhiteParameters;
use tracing::{debug, trace, warn};

use super::common::{
    cash_flow_equivalents, jamshidian, leg_cash_flow_equivalents, position_sign, CashFlowEquivalent,
    Exercise,
};
use crate::config::PricingConfig;
use crate::context::{CurveProvider, HullWhiteDataBundle};
use crate::methods::discounting::swap::{cash_annuity, cash_annuity_derivatives, fixed_leg_schedule};

// ================================================================
// Physical delivery
// ================================================================

fn physical_exercise(
    swaption: &SwaptionPhysical,
    bundle: &HullWhiteDataBundle,
    config: &PricingConfig,
) -> PricingResult<(Vec<CashFlowEquivalent>, Exercise)> {
    let expiry = swaption.expiry_time();
    debug!(expiry, strike = swaption.strike(), "hull-white physical swaption");
    let flows = cash_flow_equivalents(swaption.underlying(), bundle.curves())?;
    let parameters = bundle.parameters();
    let alphas: Vec<f64> = flows
        .iter()
        .map(|f| parameters.alpha(0.0, expiry, expiry, f.time()))
        .collect();
    let amounts: Vec<f64> = flows.iter().map(CashFlowEquivalent::discounted).collect();
    let exercise = jamshidian(&amounts, &alphas, &BrentSolver::new(config.solver_config()));
    if exercise.boundary.is_none() {
        warn!(expiry, "no exercise boundary, swaption valued at its intrinsic value");
    }
    Ok((flows, exercise))
}

/// Present value of a physical-delivery swaption.
pub fn present_value_physical(
    swaption: &SwaptionPhysical,
    bundle: &HullWhiteDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    let (_, exercise) = physical_exercise(swaption, bundle, config)?;
    Ok(CurrencyAmount::new(
        swaption.currency(),
        position_sign(swaption.is_long()) * exercise.value,
    ))
}

/// Curve sensitivity of a physical-delivery swaption.
///
/// The value is stationary in the exercise boundary, so each equivalent
/// flow contributes its own sensitivity weighted by its exercise
/// probability.
pub fn present_value_curve_sensitivity_physical(
    swaption: &SwaptionPhysical,
    bundle: &HullWhiteDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurveSensitivity> {
    let (flows, exercise) = physical_exercise(swaption, bundle, config)?;
    let sign = position_sign(swaption.is_long());
    let mut sensitivity = CurveSensitivity::new();
    for (flow, weight) in flows.iter().zip(&exercise.weights) {
        flow.add_sensitivity(&mut sensitivity, sign * weight);
    }
    Ok(sensitivity)
}

// ================================================================
// Cash settlement
// ================================================================

/// Discounted flows of the underlying in the settlement forward measure.
struct CashModel {
    /// `±1` for payer and receiver.
    omega: f64,
    strike: f64,
    notional: f64,
    year_fraction: f64,
    periods: usize,
    /// Unit flow at settlement.
    settlement: CashFlowEquivalent,
    /// `τᵢNᵢ` paid at each fixed payment time.
    accruals: Vec<CashFlowEquivalent>,
    ibor_flows: Vec<CashFlowEquivalent>,
    /// `(τᵢNᵢ·Pᵢ/P₀, αᵢ)` of the fixed coupons.
    fixed: Vec<(f64, f64)>,
    /// `(cⱼ·Pⱼ/P₀, αⱼ)` of the ibor equivalents.
    ibor: Vec<(f64, f64)>,
}

/// `exp(−αx − α²/2)`
fn bond_ratio(alpha: f64, x: f64) -> f64 {
    (-alpha * x - 0.5 * alpha * alpha).exp()
}

/// `Σ aᵢ·(−αᵢ)^k·exp(−αᵢx − αᵢ²/2)` for `k = 0..4`.
fn weighted_sums(terms: &[(f64, f64)], x: f64) -> [f64; 4] {
    let mut sums = [0.0; 4];
    for (amount, alpha) in terms {
        let mut term = amount * bond_ratio(*alpha, x);
        for s in sums.iter_mut() {
            *s += term;
            term *= -alpha;
        }
    }
    sums
}

/// `E[payoff]` with its derivatives with respect to the fixed and ibor
/// amounts of the model.
struct CashExpectation {
    value: f64,
    fixed: Vec<f64>,
    ibor: Vec<f64>,
}

impl CashModel {
    fn new(
        swaption: &SwaptionCash,
        curves: &CurveBundle,
        parameters: &HullWhiteParameters,
    ) -> PricingResult<Self> {
        let swap = swaption.underlying();
        let expiry = swaption.expiry_time();
        let settle = swaption.settlement_time();
        let (year_fraction, periods) = fixed_leg_schedule(swap.first_leg())?;
        let mut accruals = Vec::with_capacity(periods);
        for coupon in swap.first_leg().fixed_coupons() {
            accruals.push(CashFlowEquivalent::fixed(
                curves,
                coupon.funding_curve(),
                coupon.payment_time(),
                coupon.payment_year_fraction() * coupon.notional(),
            )?);
        }
        let first = swap
            .first_leg()
            .fixed_coupons()
            .next()
            .ok_or_else(|| {
                PricingError::InvalidInput("swaption without fixed coupon".to_string())
            })?;
        let settlement = CashFlowEquivalent::fixed(curves, first.funding_curve(), settle, 1.0)?;
        let df_settle = settlement.discount_factor();
        let ibor_flows = leg_cash_flow_equivalents(swap.second_leg(), curves)?;
        let alpha = |time: f64| parameters.alpha(0.0, expiry, settle, time);
        let fixed = accruals
            .iter()
            .map(|f| (f.discounted() / df_settle, alpha(f.time())))
            .collect();
        let ibor = ibor_flows
            .iter()
            .map(|f| (f.discounted() / df_settle, alpha(f.time())))
            .collect();
        Ok(Self {
            omega: if swaption.is_call() { 1.0 } else { -1.0 },
            strike: swaption.strike(),
            notional: first.notional().abs(),
            year_fraction,
            periods,
            settlement,
            accruals,
            ibor_flows,
            fixed,
            ibor,
        })
    }

    fn df_settle(&self) -> f64 {
        self.settlement.discount_factor()
    }

    fn swap_rate(&self, x: f64) -> f64 {
        -weighted_sums(&self.ibor, x)[0] / weighted_sums(&self.fixed, x)[0]
    }

    /// Payoff per unit notional, paid at settlement.
    fn payoff(&self, x: f64) -> f64 {
        let rate = self.swap_rate(x);
        let intrinsic = (self.omega * (rate - self.strike)).max(0.0);
        cash_annuity(rate, self.year_fraction, self.periods) * intrinsic
    }

    /// State at which the swap rate equals the strike.
    fn boundary(&self, config: &PricingConfig) -> Option<f64> {
        let limit = config.integration_limit;
        BrentSolver::new(config.solver_config())
            .find_root(|x| self.swap_rate(x) - self.strike, -limit, limit)
            .ok()
    }

    /// Bounds of the states where the option is exercised.
    fn exercise_region(&self, config: &PricingConfig) -> (f64, f64) {
        let limit = config.integration_limit;
        match self.boundary(config) {
            Some(x) => {
                trace!(boundary = x, "cash swaption exercise boundary");
                if self.omega * (self.swap_rate(limit) - self.strike) > 0.0 {
                    (x, limit)
                } else {
                    (-limit, x)
                }
            }
            None => {
                warn!(
                    strike = self.strike,
                    "no exercise boundary, integrating over the full range"
                );
                (-limit, limit)
            }
        }
    }

    /// `E[payoff]` by Simpson over the exercise region.
    fn integrate(&self, config: &PricingConfig) -> f64 {
        let (lo, hi) = self.exercise_region(config);
        simpson(|x| self.payoff(x) * norm_pdf(x), lo, hi, config.integration_points)
    }

    /// [`integrate`](Self::integrate) with the amount derivatives.
    ///
    /// The payoff vanishes on the boundary, so moving the region adds no
    /// first-order term.
    fn integrate_adjoint(&self, config: &PricingConfig) -> CashExpectation {
        let (lo, hi) = self.exercise_region(config);
        let mut expectation = CashExpectation {
            value: 0.0,
            fixed: vec![0.0; self.fixed.len()],
            ibor: vec![0.0; self.ibor.len()],
        };
        for (x, weight) in simpson_nodes(lo, hi, config.integration_points) {
            let annuity_sum = weighted_sums(&self.fixed, x)[0];
            let rate = -weighted_sums(&self.ibor, x)[0] / annuity_sum;
            let intrinsic = self.omega * (rate - self.strike);
            if intrinsic <= 0.0 {
                continue;
            }
            let annuity = cash_annuity_derivatives(rate, self.year_fraction, self.periods);
            let density = weight * norm_pdf(x);
            expectation.value += density * annuity[0] * intrinsic;
            // ∂S/∂aᵢ = −S·eᵢ/W and ∂S/∂bⱼ = −eⱼ/W
            let rate_bar =
                density * (annuity[1] * intrinsic + annuity[0] * self.omega) / annuity_sum;
            for ((_, alpha), bar) in self.fixed.iter().zip(expectation.fixed.iter_mut()) {
                *bar -= rate_bar * rate * bond_ratio(*alpha, x);
            }
            for ((_, alpha), bar) in self.ibor.iter().zip(expectation.ibor.iter_mut()) {
                *bar -= rate_bar * bond_ratio(*alpha, x);
            }
        }
        expectation
    }

    /// `E[payoff]` from the third-order expansion around the boundary.
    fn expand(&self, boundary: f64) -> f64 {
        let u = weighted_sums(&self.ibor, boundary);
        let w = weighted_sums(&self.fixed, boundary);
        let q0 = u[0] / w[0];
        let q1 = (u[1] - q0 * w[1]) / w[0];
        let q2 = (u[2] - 2.0 * q1 * w[1] - q0 * w[2]) / w[0];
        let q3 = (u[3] - 3.0 * q2 * w[1] - 3.0 * q1 * w[2] - q0 * w[3]) / w[0];
        let (s1, s2, s3) = (-q1, -q2, -q3);

        let annuity = cash_annuity_derivatives(self.strike, self.year_fraction, self.periods);
        let h1 = self.omega * annuity[0];
        let h2 = self.omega * 2.0 * annuity[1];
        let h3 = self.omega * 3.0 * annuity[2];
        let g1 = h1 * s1;
        let g2 = h2 * s1 * s1 + h1 * s2;
        let g3 = h3 * s1 * s1 * s1 + 3.0 * h2 * s1 * s2 + h1 * s3;

        let moments = if self.omega * s1 > 0.0 {
            right_moments(boundary)
        } else {
            let [i1, i2, i3] = right_moments(-boundary);
            [-i1, i2, -i3]
        };
        trace!(boundary, g1, g2, g3, "cash swaption expansion");
        g1 * moments[0] + g2 * moments[1] / 2.0 + g3 * moments[2] / 6.0
    }
}

/// `∫_x^∞ (y − x)^k φ(y) dy` for `k = 1, 2, 3`.
fn right_moments(x: f64) -> [f64; 3] {
    let density = norm_pdf(x);
    let tail = norm_cdf(-x);
    [
        density - x * tail,
        (1.0 + x * x) * tail - x * density,
        density * (x * x + 2.0) - tail * x * (3.0 + x * x),
    ]
}

fn cash_value(swaption: &SwaptionCash, model: &CashModel, expectation: f64) -> CurrencyAmount {
    CurrencyAmount::new(
        swaption.currency(),
        position_sign(swaption.is_long()) * model.notional * model.df_settle() * expectation,
    )
}

/// Present value of a cash-settled swaption by numerical integration.
pub fn present_value_cash_integration(
    swaption: &SwaptionCash,
    bundle: &HullWhiteDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    debug!(
        expiry = swaption.expiry_time(),
        strike = swaption.strike(),
        points = config.integration_points,
        "hull-white cash swaption, integration"
    );
    let model = CashModel::new(swaption, bundle.curves(), bundle.parameters())?;
    Ok(cash_value(swaption, &model, model.integrate(config)))
}

/// Present value of a cash-settled swaption by the third-order expansion.
///
/// Falls back to integration when the swap rate never reaches the strike.
pub fn present_value_cash_approximation(
    swaption: &SwaptionCash,
    bundle: &HullWhiteDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    debug!(
        expiry = swaption.expiry_time(),
        strike = swaption.strike(),
        "hull-white cash swaption, approximation"
    );
    let model = CashModel::new(swaption, bundle.curves(), bundle.parameters())?;
    let expectation = match model.boundary(config) {
        Some(boundary) => model.expand(boundary),
        None => {
            warn!(
                strike = model.strike,
                "no exercise boundary, approximation falls back to integration"
            );
            model.integrate(config)
        }
    };
    Ok(cash_value(swaption, &model, expectation))
}

/// Curve sensitivity of a cash-settled swaption.
///
/// Differentiates the integrated value, whichever route priced it. The
/// expectation depends on the amounts only through the swap rate, so it
/// is invariant under a common scaling and the settlement discount factor
/// enters through the `N·P₀` factor alone.
pub fn present_value_curve_sensitivity_cash(
    swaption: &SwaptionCash,
    bundle: &HullWhiteDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurveSensitivity> {
    debug!(
        expiry = swaption.expiry_time(),
        strike = swaption.strike(),
        "hull-white cash swaption, curve sensitivity"
    );
    let model = CashModel::new(swaption, bundle.curves(), bundle.parameters())?;
    let expectation = model.integrate_adjoint(config);
    let scale = position_sign(swaption.is_long()) * model.notional;
    let mut sensitivity = CurveSensitivity::new();
    model.settlement.add_sensitivity(&mut sensitivity, scale * expectation.value);
    for (flow, bar) in model.accruals.iter().zip(&expectation.fixed) {
        flow.add_sensitivity(&mut sensitivity, scale * bar);
    }
    for (flow, bar) in model.ibor_flows.iter().zip(&expectation.ibor) {
        flow.add_sensitivity(&mut sensitivity, scale * bar);
    }
    Ok(sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::swap;
    use crate::methods::discounting::discount_factor;
    use crate::methods::discounting::test_support::{assert_nodes_match, curves, FORWARD, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;
    use pricer_models::instruments::rates::Swap;

    const NOTIONAL: f64 = 1e8;
    const EXPIRY: f64 = 5.0;

    fn parameters() -> HullWhiteParameters {
        HullWhiteParameters::new(
            0.01,
            vec![0.01, 0.011, 0.012, 0.013, 0.014],
            vec![0.5, 1.0, 2.0, 5.0],
        )
        .unwrap()
    }

    fn bundle() -> HullWhiteDataBundle {
        HullWhiteDataBundle::new(curves(), parameters())
    }

    fn underlying(notional: f64, strike: f64, is_payer: bool) -> Swap {
        Swap::fixed_ibor(
            Currency::USD,
            EXPIRY,
            5.0,
            1,
            2,
            notional,
            strike,
            is_payer,
            FUNDING,
            FORWARD,
        )
        .unwrap()
    }

    fn physical(strike: f64, is_payer: bool, is_long: bool) -> SwaptionPhysical {
        SwaptionPhysical::new(underlying(NOTIONAL, strike, is_payer), EXPIRY, is_long).unwrap()
    }

    fn cash(notional: f64, strike: f64, is_payer: bool, is_long: bool) -> SwaptionCash {
        SwaptionCash::new(underlying(notional, strike, is_payer), EXPIRY, EXPIRY, is_long).unwrap()
    }

    fn atm() -> f64 {
        swap::forward_swap_rate(&underlying(NOTIONAL, 0.03, true), &curves()).unwrap()
    }

    fn config() -> PricingConfig {
        PricingConfig::default()
    }

    // ==========================================================
    // Physical delivery
    // ==========================================================

    #[test]
    fn test_physical_payer_receiver_parity() {
        let bundle = bundle();
        let payer =
            present_value_physical(&physical(0.0325, true, true), &bundle, &config()).unwrap();
        let receiver =
            present_value_physical(&physical(0.0325, false, true), &bundle, &config()).unwrap();
        let swap_pv =
            swap::present_value(&underlying(NOTIONAL, 0.0325, true), bundle.curves()).unwrap();
        assert!(payer.amount() > 0.0 && receiver.amount() > 0.0);
        assert_relative_eq!(payer.amount() - receiver.amount(), swap_pv.amount(), epsilon = 1e-2);
    }

    #[test]
    fn test_physical_long_short_parity() {
        let bundle = bundle();
        let long =
            present_value_physical(&physical(0.0325, true, true), &bundle, &config()).unwrap();
        let short =
            present_value_physical(&physical(0.0325, true, false), &bundle, &config()).unwrap();
        assert_relative_eq!(long.amount() + short.amount(), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_physical_against_direct_integration() {
        let bundle = bundle();
        let swaption = physical(atm(), false, true);
        let flows = cash_flow_equivalents(swaption.underlying(), bundle.curves()).unwrap();
        let params = parameters();
        let value_at = |x: f64| -> f64 {
            flows
                .iter()
                .map(|f| {
                    let alpha = params.alpha(0.0, EXPIRY, EXPIRY, f.time());
                    f.discounted() * (-alpha * x - 0.5 * alpha * alpha).exp()
                })
                .sum::<f64>()
                .max(0.0)
        };
        let expected = simpson(|x| value_at(x) * norm_pdf(x), -10.0, 10.0, 20_000);
        let pv = present_value_physical(&swaption, &bundle, &config()).unwrap();
        assert_relative_eq!(pv.amount(), expected, max_relative = 1e-5);
    }

    #[test]
    fn test_physical_zero_volatility_is_intrinsic() {
        let flat =
            HullWhiteDataBundle::new(curves(), HullWhiteParameters::constant(0.01, 0.0).unwrap());
        let strike = 0.0325;
        let swap_pv = swap::present_value(&underlying(NOTIONAL, strike, true), flat.curves())
            .unwrap()
            .amount();
        assert!(swap_pv > 0.0);
        let payer =
            present_value_physical(&physical(strike, true, true), &flat, &config()).unwrap();
        let receiver =
            present_value_physical(&physical(strike, false, true), &flat, &config()).unwrap();
        assert_relative_eq!(payer.amount(), swap_pv, max_relative = 1e-10);
        assert_eq!(receiver.amount(), 0.0);
    }

    #[test]
    fn test_physical_curve_sensitivity_against_node_bumps() {
        let bundle = bundle();
        for strike in [0.03, 0.038] {
            for (is_payer, is_long) in [(true, false), (false, true)] {
                let swaption = physical(strike, is_payer, is_long);
                let sensitivity =
                    present_value_curve_sensitivity_physical(&swaption, &bundle, &config())
                        .unwrap();
                let expected = [FUNDING, FORWARD];
                assert_nodes_match(&sensitivity, bundle.curves(), &expected, 1e-6 * NOTIONAL, |c| {
                    let bumped = bundle.with_curves(c.clone());
                    present_value_physical(&swaption, &bumped, &config()).unwrap().amount()
                });
            }
        }
    }

    // ==========================================================
    // Cash settlement
    // ==========================================================

    #[test]
    fn test_cash_approximation_matches_integration() {
        let bundle = bundle();
        let atm = atm();
        for shift in [-0.025, -0.015, -0.005, 0.0, 0.005, 0.015, 0.025] {
            for is_payer in [true, false] {
                let swaption = cash(NOTIONAL, atm + shift, is_payer, true);
                let integrated =
                    present_value_cash_integration(&swaption, &bundle, &config()).unwrap();
                let approximated =
                    present_value_cash_approximation(&swaption, &bundle, &config()).unwrap();
                assert!(integrated.amount() > 0.0);
                assert_relative_eq!(
                    approximated.amount(),
                    integrated.amount(),
                    epsilon = 0.5e-4 * NOTIONAL
                );
            }
        }
    }

    #[test]
    fn test_cash_integration_scales_with_notional() {
        let bundle = bundle();
        let pv = |notional: f64| {
            let swaption = cash(notional, 0.0325, true, true);
            present_value_cash_integration(&swaption, &bundle, &config()).unwrap()
        };
        let (base, scaled) = (pv(NOTIONAL), pv(12.3 * NOTIONAL));
        assert_relative_eq!(scaled.amount(), 12.3 * base.amount(), epsilon = 1e-1);
    }

    #[test]
    fn test_cash_long_short_parity() {
        let bundle = bundle();
        for price in [present_value_cash_integration, present_value_cash_approximation] {
            let long = price(&cash(NOTIONAL, 0.04, false, true), &bundle, &config()).unwrap();
            let short = price(&cash(NOTIONAL, 0.04, false, false), &bundle, &config()).unwrap();
            assert_relative_eq!(long.amount() + short.amount(), 0.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_cash_zero_volatility_is_intrinsic() {
        let flat =
            HullWhiteDataBundle::new(curves(), HullWhiteParameters::constant(0.01, 0.0).unwrap());
        let strike = 0.0325;
        let swaption = cash(NOTIONAL, strike, true, true);
        let rate = swap::forward_swap_rate(swaption.underlying(), flat.curves()).unwrap();
        let df = discount_factor(flat.curves(), FUNDING, EXPIRY).unwrap();
        let intrinsic = NOTIONAL * df * cash_annuity(rate, 1.0, 5) * (rate - strike);
        let integrated = present_value_cash_integration(&swaption, &flat, &config()).unwrap();
        let approximated = present_value_cash_approximation(&swaption, &flat, &config()).unwrap();
        assert_relative_eq!(integrated.amount(), intrinsic, max_relative = 1e-8);
        assert_relative_eq!(approximated.amount(), intrinsic, max_relative = 1e-8);
    }

    #[test]
    fn test_cash_curve_sensitivity_against_node_bumps() {
        let bundle = bundle();
        for strike in [0.03, 0.038] {
            for (is_payer, is_long) in [(true, true), (false, false)] {
                let swaption = cash(NOTIONAL, strike, is_payer, is_long);
                let sensitivity =
                    present_value_curve_sensitivity_cash(&swaption, &bundle, &config()).unwrap();
                let expected = [FUNDING, FORWARD];
                assert_nodes_match(&sensitivity, bundle.curves(), &expected, 1e-6 * NOTIONAL, |c| {
                    let bumped = bundle.with_curves(c.clone());
                    present_value_cash_integration(&swaption, &bumped, &config()).unwrap().amount()
                });
            }
        }
    }

    #[test]
    fn test_cash_curve_sensitivity_long_short_parity() {
        let bundle = bundle();
        let sensitivity = |is_long: bool| {
            let swaption = cash(NOTIONAL, 0.035, true, is_long);
            present_value_curve_sensitivity_cash(&swaption, &bundle, &config()).unwrap()
        };
        let (long, short) = (sensitivity(true), sensitivity(false));
        assert!(long.plus(&short).approx_eq(&CurveSensitivity::new(), 1e-6));
    }

    #[test]
    fn test_right_moments_against_quadrature() {
        for x in [-1.3, 0.0, 0.7] {
            let moments = right_moments(x);
            for (k, moment) in moments.iter().enumerate() {
                let power = (k + 1) as i32;
                let expected = simpson(|y| (y - x).powi(power) * norm_pdf(y), x, 12.0, 8_000);
                assert_relative_eq!(*moment, expected, epsilon = 1e-10);
            }
        }
    }
}
