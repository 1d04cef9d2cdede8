//! G2++ method for physical-delivery swaptions.
//!
//! Under the forward measure at expiry `θ` the swap value is
//! `Σ cᵢPᵢ·exp(−Hᵢ·X − ½HᵢᵀΓHᵢ)` with `X ~ N(0, Γ)`. Two routes:
//!
//! - integration: `X` is split into independent `z` and `y`; the
//!   expectation in `y` is explicit for each `z` and `z` is integrated
//!   with Simpson
//! - approximation: the forward swap rate is taken normal with the
//!   variance implied by its sensitivity to `X`, and priced with Bachelier

use pricer_core::math::distributions::norm_pdf;
use pricer_core::math::integration::simpson_nodes;
use pricer_core::math::solvers::BrentSolver;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{CurrencyAmount, PricingResult};
use pricer_models::analytical::Bachelier;
use pricer_models::instruments::rates::SwaptionPhysical;
use tracing::{debug, trace};

use super::common::{
    cash_flow_equivalents, jamshidian, leg_cash_flow_equivalents, position_sign, CashFlowEquivalent,
};
use crate::config::PricingConfig;
use crate::context::{CurveProvider, G2ppDataBundle};

/// Below this every loading on the second normal is treated as zero.
const DEGENERATE_LOADING: f64 = 1e-14;

// ================================================================
// Numerical integration
// ================================================================

/// Flow of the swap expressed on the two independent normals.
struct Loading {
    /// `exp(−½HᵢᵀΓHᵢ)`
    damping: f64,
    u: f64,
    v: f64,
}

/// Equivalent flows with their loadings.
struct FactorModel {
    flows: Vec<CashFlowEquivalent>,
    loadings: Vec<Loading>,
    alphas: Vec<f64>,
    degenerate: bool,
}

impl FactorModel {
    fn new(swaption: &SwaptionPhysical, bundle: &G2ppDataBundle) -> PricingResult<Self> {
        let expiry = swaption.expiry_time();
        let parameters = bundle.parameters();
        let gamma = parameters.gamma(0.0, expiry);
        let s1 = gamma[0][0].sqrt();
        let s2 = gamma[1][1].sqrt();
        let rho = if s1 * s2 > 0.0 {
            (gamma[0][1] / (s1 * s2)).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let orthogonal = (1.0 - rho * rho).sqrt();

        let flows = cash_flow_equivalents(swaption.underlying(), bundle.curves())?;
        let loadings: Vec<Loading> = flows
            .iter()
            .map(|flow| {
                let h = parameters.bond_factor(expiry, flow.time());
                let variance = h[0] * h[0] * gamma[0][0]
                    + 2.0 * h[0] * h[1] * gamma[0][1]
                    + h[1] * h[1] * gamma[1][1];
                Loading {
                    damping: (-0.5 * variance).exp(),
                    u: h[0] * s1 + h[1] * s2 * rho,
                    v: h[1] * s2 * orthogonal,
                }
            })
            .collect();
        let degenerate = loadings.iter().all(|l| l.v.abs() < DEGENERATE_LOADING);
        trace!(s1, s2, rho, degenerate, "g2++ factor decomposition");
        Ok(Self {
            flows,
            alphas: loadings.iter().map(|l| l.v).collect(),
            loadings,
            degenerate,
        })
    }

    /// Swap value positive part given the first normal, with its
    /// derivatives with respect to the discounted flows.
    fn conditional(&self, z: f64, solver: &BrentSolver) -> (f64, Vec<f64>) {
        if self.degenerate {
            let factors: Vec<f64> = self
                .loadings
                .iter()
                .map(|l| l.damping * (-l.u * z).exp())
                .collect();
            let total: f64 = self
                .flows
                .iter()
                .zip(&factors)
                .map(|(f, k)| f.discounted() * k)
                .sum();
            return if total > 0.0 {
                (total, factors)
            } else {
                (0.0, vec![0.0; factors.len()])
            };
        }
        let factors: Vec<f64> = self
            .loadings
            .iter()
            .map(|l| l.damping * (-l.u * z + 0.5 * l.v * l.v).exp())
            .collect();
        let amounts: Vec<f64> = self
            .flows
            .iter()
            .zip(&factors)
            .map(|(f, k)| f.discounted() * k)
            .collect();
        let exercise = jamshidian(&amounts, &self.alphas, solver);
        let weights = exercise.weights.iter().zip(&factors).map(|(w, k)| w * k).collect();
        (exercise.value, weights)
    }

    /// `E[swap value⁺]` and its derivatives with respect to the
    /// discounted flows.
    fn integrate(&self, config: &PricingConfig) -> (f64, Vec<f64>) {
        let solver = BrentSolver::new(config.solver_config());
        let limit = config.integration_limit;
        let mut value = 0.0;
        let mut gradient = vec![0.0; self.flows.len()];
        for (z, weight) in simpson_nodes(-limit, limit, config.integration_points) {
            let density = weight * norm_pdf(z);
            let (inner, inner_gradient) = self.conditional(z, &solver);
            value += density * inner;
            for (g, d) in gradient.iter_mut().zip(&inner_gradient) {
                *g += density * d;
            }
        }
        (value, gradient)
    }
}

/// Present value by numerical integration over the first normal.
pub fn present_value_integration(
    swaption: &SwaptionPhysical,
    bundle: &G2ppDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    debug!(
        expiry = swaption.expiry_time(),
        strike = swaption.strike(),
        points = config.integration_points,
        "g2++ swaption, integration"
    );
    let (value, _) = FactorModel::new(swaption, bundle)?.integrate(config);
    Ok(CurrencyAmount::new(
        swaption.currency(),
        position_sign(swaption.is_long()) * value,
    ))
}

/// Curve sensitivity of [`present_value_integration`].
pub fn present_value_curve_sensitivity_integration(
    swaption: &SwaptionPhysical,
    bundle: &G2ppDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurveSensitivity> {
    debug!(expiry = swaption.expiry_time(), "g2++ swaption curve sensitivity, integration");
    let model = FactorModel::new(swaption, bundle)?;
    let (_, gradient) = model.integrate(config);
    let sign = position_sign(swaption.is_long());
    let mut sensitivity = CurveSensitivity::new();
    for (flow, weight) in model.flows.iter().zip(&gradient) {
        flow.add_sensitivity(&mut sensitivity, sign * weight);
    }
    Ok(sensitivity)
}

// ================================================================
// Normal approximation
// ================================================================

/// Forward swap rate with its loadings on `X` at `X = 0`.
struct RateModel {
    /// `τᵢNᵢ` paid at each fixed payment time.
    accruals: Vec<CashFlowEquivalent>,
    ibor_flows: Vec<CashFlowEquivalent>,
    fixed_factors: Vec<[f64; 2]>,
    ibor_factors: Vec<[f64; 2]>,
    gamma: [[f64; 2]; 2],
    /// `W`, the discounted accruals.
    pvbp: f64,
    pvbp_gradient: [f64; 2],
    rate: f64,
    rate_gradient: [f64; 2],
    volatility: f64,
}

impl RateModel {
    fn new(swaption: &SwaptionPhysical, bundle: &G2ppDataBundle) -> PricingResult<Self> {
        let expiry = swaption.expiry_time();
        let parameters = bundle.parameters();
        let curves = bundle.curves();
        let swap = swaption.underlying();

        let mut accruals = Vec::new();
        for coupon in swap.first_leg().fixed_coupons() {
            accruals.push(CashFlowEquivalent::fixed(
                curves,
                coupon.funding_curve(),
                coupon.payment_time(),
                coupon.payment_year_fraction() * coupon.notional(),
            )?);
        }
        let ibor_flows = leg_cash_flow_equivalents(swap.second_leg(), curves)?;
        let factors = |flows: &[CashFlowEquivalent]| -> Vec<[f64; 2]> {
            flows.iter().map(|f| parameters.bond_factor(expiry, f.time())).collect()
        };
        let fixed_factors = factors(&accruals);
        let ibor_factors = factors(&ibor_flows);

        // U and W with their derivatives in X at X = 0
        let sums = |flows: &[CashFlowEquivalent], h: &[[f64; 2]]| {
            let mut value = 0.0;
            let mut gradient = [0.0; 2];
            for (flow, h) in flows.iter().zip(h) {
                value += flow.discounted();
                gradient[0] -= flow.discounted() * h[0];
                gradient[1] -= flow.discounted() * h[1];
            }
            (value, gradient)
        };
        let (pvbp, pvbp_gradient) = sums(&accruals, &fixed_factors);
        let (floating, floating_gradient) = sums(&ibor_flows, &ibor_factors);
        let rate = -floating / pvbp;
        let rate_gradient = [
            -(floating_gradient[0] + rate * pvbp_gradient[0]) / pvbp,
            -(floating_gradient[1] + rate * pvbp_gradient[1]) / pvbp,
        ];

        let gamma = parameters.gamma(0.0, expiry);
        let variance = quadratic(&gamma, &rate_gradient);
        let volatility = if expiry > 0.0 {
            (variance.max(0.0) / expiry).sqrt()
        } else {
            0.0
        };
        trace!(rate, volatility, "g2++ normal volatility");
        Ok(Self {
            accruals,
            ibor_flows,
            fixed_factors,
            ibor_factors,
            gamma,
            pvbp,
            pvbp_gradient,
            rate,
            rate_gradient,
            volatility,
        })
    }
}

/// `gᵀΓg`
fn quadratic(gamma: &[[f64; 2]; 2], g: &[f64; 2]) -> f64 {
    (0..2)
        .flat_map(|k| (0..2).map(move |l| (k, l)))
        .map(|(k, l)| g[k] * gamma[k][l] * g[l])
        .sum()
}

/// Present value with the forward swap rate normal at the model variance.
pub fn present_value_approximation(
    swaption: &SwaptionPhysical,
    bundle: &G2ppDataBundle,
    _config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    let expiry = swaption.expiry_time();
    debug!(expiry, strike = swaption.strike(), "g2++ swaption, approximation");
    let model = RateModel::new(swaption, bundle)?;
    let price = Bachelier::new(model.rate, model.volatility)?.price(
        swaption.strike(),
        expiry,
        swaption.is_call(),
    );
    Ok(CurrencyAmount::new(
        swaption.currency(),
        position_sign(swaption.is_long()) * model.pvbp.abs() * price,
    ))
}

/// Curve sensitivity of [`present_value_approximation`], by a backward
/// sweep through the Bachelier price, the rate variance and the rate.
pub fn present_value_curve_sensitivity_approximation(
    swaption: &SwaptionPhysical,
    bundle: &G2ppDataBundle,
    _config: &PricingConfig,
) -> PricingResult<CurveSensitivity> {
    let expiry = swaption.expiry_time();
    debug!(expiry, "g2++ swaption curve sensitivity, approximation");
    let model = RateModel::new(swaption, bundle)?;
    let sign = position_sign(swaption.is_long());
    let adjoint = Bachelier::new(model.rate, model.volatility)?.price_adjoint(
        swaption.strike(),
        expiry,
        swaption.is_call(),
    );
    let pvbp = model.pvbp;
    let rate = model.rate;

    let price_bar = sign * pvbp.abs();
    let mut pvbp_bar = sign * pvbp.signum() * adjoint.price;
    let mut rate_bar = price_bar * adjoint.forward;
    let volatility_bar = price_bar * adjoint.volatility;
    let variance_bar = if model.volatility > 0.0 {
        volatility_bar / (2.0 * model.volatility * expiry)
    } else {
        0.0
    };
    let mut floating_gradient_bar = [0.0; 2];
    let mut pvbp_gradient_bar = [0.0; 2];
    for k in 0..2 {
        let gamma_g = model.gamma[k][0] * model.rate_gradient[0]
            + model.gamma[k][1] * model.rate_gradient[1];
        let rate_gradient_bar = 2.0 * variance_bar * gamma_g;
        floating_gradient_bar[k] = -rate_gradient_bar / pvbp;
        pvbp_gradient_bar[k] = -rate_gradient_bar * rate / pvbp;
        rate_bar -= rate_gradient_bar * model.pvbp_gradient[k] / pvbp;
        pvbp_bar -= rate_gradient_bar * model.rate_gradient[k] / pvbp;
    }
    let floating_bar = -rate_bar / pvbp;
    pvbp_bar -= rate_bar * rate / pvbp;
    trace!(pvbp_bar, floating_bar, "g2++ approximation adjoints");

    let mut sensitivity = CurveSensitivity::new();
    for (flow, h) in model.accruals.iter().zip(&model.fixed_factors) {
        let bar = pvbp_bar - pvbp_gradient_bar[0] * h[0] - pvbp_gradient_bar[1] * h[1];
        flow.add_sensitivity(&mut sensitivity, bar);
    }
    for (flow, h) in model.ibor_flows.iter().zip(&model.ibor_factors) {
        let bar = floating_bar - floating_gradient_bar[0] * h[0] - floating_gradient_bar[1] * h[1];
        flow.add_sensitivity(&mut sensitivity, bar);
    }
    Ok(sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HullWhiteDataBundle;
    use crate::methods::discounting::swap;
    use crate::methods::discounting::test_support::{assert_nodes_match, curves, FORWARD, FUNDING};
    use crate::methods::swaption::hull_white;
    use approx::assert_relative_eq;
    use pricer_core::market_data::CurveBundle;
    use pricer_core::types::Currency;
    use pricer_models::instruments::rates::Swap;
    use pricer_models::models::{G2ppParameters, HullWhiteParameters};

    const NOTIONAL: f64 = 1e8;
    const EXPIRY: f64 = 5.0;
    const TIMES: [f64; 4] = [0.5, 1.0, 2.0, 5.0];
    const VOL1: [f64; 5] = [0.01, 0.011, 0.012, 0.013, 0.014];

    fn bundle() -> G2ppDataBundle {
        let parameters = G2ppParameters::new(
            [0.01, 0.30],
            [VOL1.to_vec(), vec![0.01, 0.009, 0.008, 0.007, 0.006]],
            TIMES.to_vec(),
            -0.30,
        )
        .unwrap();
        G2ppDataBundle::new(curves(), parameters)
    }

    fn underlying(strike: f64, is_payer: bool) -> Swap {
Swap::fixed_ibor(
            Currency::USD,
            EXPIRY,
            5.0,
            1,
            2,
            NOTIONAL,
            strike,
            is_payer,
            FUNDING,
            FORWARD,
        )
        .unwrap()
    }

    fn swaption(strike: f64, is_payer: bool, is_long: bool) -> SwaptionPhysical {
        SwaptionPhysical::new(underlying(strike, is_payer), EXPIRY, is_long).unwrap()
    }

    fn atm() -> f64 {
        swap::forward_swap_rate(&underlying(0.03, true), &curves()).unwrap()
    }

    fn config() -> PricingConfig {
        PricingConfig::default()
    }

    // ==========================================================
    // Parity
    // ==========================================================

    #[test]
    fn test_long_short_parity() {
        let bundle = bundle();
        for price in [present_value_integration, present_value_approximation] {
            let long = price(&swaption(0.0325, true, true), &bundle, &config()).unwrap();
            let short = price(&swaption(0.0325, true, false), &bundle, &config()).unwrap();
            assert!(long.amount() > 0.0);
            assert_relative_eq!(long.amount() + short.amount(), 0.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_payer_receiver_swap_parity() {
        let bundle = bundle();
        let strike = 0.0325;
        let swap_pv = swap::present_value(&underlying(strike, true), bundle.curves())
            .unwrap()
            .amount();
        for price in [present_value_integration, present_value_approximation] {
            let payer = price(&swaption(strike, true, true), &bundle, &config()).unwrap();
            let receiver = price(&swaption(strike, false, true), &bundle, &config()).unwrap();
            assert_relative_eq!(payer.amount() - receiver.amount(), swap_pv, epsilon = 1e-2);
        }
    }

    // ==========================================================
    // Consistency
    // ==========================================================

    #[test]
    fn test_approximation_close_to_integration() {
        let bundle = bundle();
        for strike in [atm(), 0.0325] {
            for is_payer in [true, false] {
                let s = swaption(strike, is_payer, true);
                let integrated = present_value_integration(&s, &bundle, &config()).unwrap();
                let approximated = present_value_approximation(&s, &bundle, &config()).unwrap();
                let (approximated, integrated) = (approximated.amount(), integrated.amount());
                assert_relative_eq!(approximated, integrated, max_relative = 2e-2);
            }
        }
    }

    #[test]
    fn test_single_factor_matches_hull_white() {
        let g2 = G2ppDataBundle::new(
            curves(),
            G2ppParameters::new([0.01, 0.30], [VOL1.to_vec(), vec![0.0; 5]], TIMES.to_vec(), 0.0)
                .unwrap(),
        );
        let hw = HullWhiteDataBundle::new(
            curves(),
            HullWhiteParameters::new(0.01, VOL1.to_vec(), TIMES.to_vec()).unwrap(),
        );
        for is_payer in [true, false] {
            let s = swaption(atm(), is_payer, true);
            let g2_pv = present_value_integration(&s, &g2, &config()).unwrap();
            let hw_pv = hull_white::present_value_physical(&s, &hw, &config()).unwrap();
            assert_relative_eq!(g2_pv.amount(), hw_pv.amount(), max_relative = 2e-3);
        }
    }

    // ==========================================================
    // Curve sensitivity
    // ==========================================================

    #[test]
    fn test_integration_curve_sensitivity_against_node_bumps() {
        let bundle = bundle();
        for strike in [0.03, 0.038] {
            for (is_payer, is_long) in [(true, true), (false, false)] {
                let s = swaption(strike, is_payer, is_long);
                let sensitivity =
                    present_value_curve_sensitivity_integration(&s, &bundle, &config()).unwrap();
                let pv = |c: &CurveBundle| {
                    present_value_integration(&s, &bundle.with_curves(c.clone()), &config())
                        .unwrap()
                        .amount()
                };
                let curves = bundle.curves();
                assert_nodes_match(&sensitivity, curves, &[FUNDING, FORWARD], 1e-6 * NOTIONAL, pv);
            }
        }
    }

    #[test]
    fn test_approximation_curve_sensitivity_against_node_bumps() {
        let bundle = bundle();
        for strike in [0.03, 0.038] {
            for (is_payer, is_long) in [(true, false), (false, true)] {
                let s = swaption(strike, is_payer, is_long);
                let sensitivity =
                    present_value_curve_sensitivity_approximation(&s, &bundle, &config()).unwrap();
                let pv = |c: &CurveBundle| {
                    present_value_approximation(&s, &bundle.with_curves(c.clone()), &config())
                        .unwrap()
                        .amount()
                };
                let curves = bundle.curves();
                assert_nodes_match(&sensitivity, curves, &[FUNDING, FORWARD], 1e-6 * NOTIONAL, pv);
            }
        }
    }

    #[test]
    fn test_correlation_moves_the_value() {
        let s = swaption(atm(), true, true);
        let value = |rho: f64| {
            let parameters = G2ppParameters::new(
                [0.01, 0.30],
                [VOL1.to_vec(), vec![0.01, 0.009, 0.008, 0.007, 0.006]],
                TIMES.to_vec(),
                rho,
            )
            .unwrap();
            present_value_integration(&s, &G2ppDataBundle::new(curves(), parameters), &config())
                .unwrap()
                .amount()
        };
        // Swap rate variance grows with the factor correlation.
        assert!(value(-0.8) < value(0.0));
        assert!(value(0.0) < value(0.8));
    }
}
