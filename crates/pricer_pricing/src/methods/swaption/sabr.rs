//! SABR method for European swaptions, with right-tail extrapolation.
//!
//! The forward swap rate `S₀` is lognormal in Black's model with the SABR
//! implied volatility at `(expiry, tenor)`. Strikes above the configured
//! cutoff are priced on the extrapolated tail.
//!
//! - Physical delivery: `PV = ±|W|·P(S₀, K)`, `W` the fixed leg PVBP.
//! - Cash settlement: `PV = ±|N|·P_d(t_s)·Â(S₀)·P(S₀, K)`, `Â` the cash
//!   annuity of the fixed leg.

use pricer_core::sensitivity::{CurveSensitivity, SurfaceValue};
use pricer_core::types::{CurrencyAmount, PricingResult};
use pricer_models::instruments::rates::{Swap, SwaptionCash, SwaptionPhysical};
use pricer_models::models::{SabrExtrapolationRight, SabrPriceAdjoint};
use tracing::{debug, trace};

use super::common::position_sign;
use crate::config::PricingConfig;
use crate::context::{CurveProvider, SabrDataBundle};
use crate::methods::discounting::swap::{
    cash_annuity_derivatives, fixed_leg_pvbp, fixed_leg_pvbp_curve_sensitivity, fixed_leg_schedule,
    forward_swap_rate, forward_swap_rate_curve_sensitivity,
};
use crate::methods::discounting::{add_discount_node, discount_factor};

/// Sensitivities to the SABR parameters, keyed by `(expiry, tenor)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SabrSensitivity {
    /// ∂PV/∂α
    pub alpha: SurfaceValue,
    /// ∂PV/∂ρ
    pub rho: SurfaceValue,
    /// ∂PV/∂ν
    pub nu: SurfaceValue,
}

impl SabrSensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single point for the three parameters.
    pub fn of(expiry: f64, tenor: f64, alpha: f64, rho: f64, nu: f64) -> Self {
        Self {
            alpha: SurfaceValue::of(expiry, tenor, alpha),
            rho: SurfaceValue::of(expiry, tenor, rho),
            nu: SurfaceValue::of(expiry, tenor, nu),
        }
    }

    /// Point-wise sum.
    pub fn plus(self, other: &SabrSensitivity) -> Self {
        Self {
            alpha: self.alpha.plus(&other.alpha),
            rho: self.rho.plus(&other.rho),
            nu: self.nu.plus(&other.nu),
        }
    }

    /// Every value scaled by `factor`.
    pub fn multiplied_by(self, factor: f64) -> Self {
        Self {
            alpha: self.alpha.multiplied_by(factor),
            rho: self.rho.multiplied_by(factor),
            nu: self.nu.multiplied_by(factor),
        }
    }
}

/// Forward, price and its adjoint for one swaption.
struct Pricing {
    forward: f64,
    adjoint: SabrPriceAdjoint,
}

#[allow(clippy::too_many_arguments)]
fn price(
    swap: &Swap,
    strike: f64,
    is_call: bool,
    expiry: f64,
    tenor: f64,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<Pricing> {
    let forward = forward_swap_rate(swap, bundle.curves())?;
    let parameters = bundle.surface().parameters(expiry, tenor)?;
    let model = SabrExtrapolationRight::new(
        forward,
        parameters,
        expiry,
        config.sabr_cutoff_strike,
        config.sabr_tail_mu,
    )?;
    let adjoint = model.price_adjoint(strike, is_call)?;
    trace!(forward, strike, price = adjoint.price, "sabr swaption");
    Ok(Pricing { forward, adjoint })
}

fn physical_pricing(
    swaption: &SwaptionPhysical,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<(Pricing, f64)> {
    debug!(
        expiry = swaption.expiry_time(),
        tenor = swaption.tenor(),
        strike = swaption.strike(),
        "sabr physical swaption"
    );
    let swap = swaption.underlying();
    let pricing = price(
        swap,
        swaption.strike(),
        swaption.is_call(),
        swaption.expiry_time(),
        swaption.tenor(),
        bundle,
        config,
    )?;
    let pvbp = fixed_leg_pvbp(swap.first_leg(), bundle.curves())?;
    Ok((pricing, pvbp))
}

/// Present value of a physical-delivery swaption.
pub fn present_value_physical(
    swaption: &SwaptionPhysical,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    let (pricing, pvbp) = physical_pricing(swaption, bundle, config)?;
    let pv = position_sign(swaption.is_long()) * pvbp.abs() * pricing.adjoint.price;
    Ok(CurrencyAmount::new(swaption.currency(), pv))
}

/// Curve sensitivity of a physical-delivery swaption.
pub fn present_value_curve_sensitivity_physical(
    swaption: &SwaptionPhysical,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurveSensitivity> {
    let (pricing, pvbp) = physical_pricing(swaption, bundle, config)?;
    let swap = swaption.underlying();
    let curves = bundle.curves();
    let sign = position_sign(swaption.is_long());
    let pvbp_sensitivity = fixed_leg_pvbp_curve_sensitivity(swap.first_leg(), curves)?
        .multiplied_by(pvbp.signum() * pricing.adjoint.price);
    let rate_sensitivity = forward_swap_rate_curve_sensitivity(swap, curves)?
        .multiplied_by(pvbp.abs() * pricing.adjoint.forward);
    Ok(pvbp_sensitivity.plus(&rate_sensitivity).multiplied_by(sign))
}

/// SABR parameter sensitivity of a physical-delivery swaption.
pub fn present_value_sabr_sensitivity_physical(
    swaption: &SwaptionPhysical,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<SabrSensitivity> {
    let (pricing, pvbp) = physical_pricing(swaption, bundle, config)?;
    let factor = position_sign(swaption.is_long()) * pvbp.abs();
    let a = pricing.adjoint;
    Ok(SabrSensitivity::of(
        swaption.expiry_time(),
        swaption.tenor(),
        factor * a.alpha,
        factor * a.rho,
        factor * a.nu,
    ))
}

/// Cash annuity terms of a cash-settled swaption.
struct CashTerms {
    pricing: Pricing,
    notional: f64,
    df_settle: f64,
    funding: String,
    annuity: [f64; 4],
}

fn cash_terms(
    swaption: &SwaptionCash,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<CashTerms> {
    debug!(
        expiry = swaption.expiry_time(),
        settlement = swaption.settlement_time(),
        strike = swaption.strike(),
        "sabr cash swaption"
    );
    let swap = swaption.underlying();
    let pricing = price(
        swap,
        swaption.strike(),
        swaption.is_call(),
        swaption.expiry_time(),
        swaption.tenor(),
        bundle,
        config,
    )?;
    let (year_fraction, periods) = fixed_leg_schedule(swap.first_leg())?;
    let (notional, funding) = swap
        .first_leg()
        .fixed_coupons()
        .next()
        .map(|c| (c.notional().abs(), c.funding_curve().to_string()))
        .unwrap_or_default();
    let df_settle = discount_factor(bundle.curves(), &funding, swaption.settlement_time())?;
    let annuity = cash_annuity_derivatives(pricing.forward, year_fraction, periods);
    Ok(CashTerms {
        pricing,
        notional,
        df_settle,
        funding,
        annuity,
    })
}

/// Present value of a cash-settled swaption.
pub fn present_value_cash(
    swaption: &SwaptionCash,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurrencyAmount> {
    let t = cash_terms(swaption, bundle, config)?;
    let pv = position_sign(swaption.is_long())
        * t.notional
        * t.df_settle
        * t.annuity[0]
        * t.pricing.adjoint.price;
    Ok(CurrencyAmount::new(swaption.currency(), pv))
}

/// Curve sensitivity of a cash-settled swaption.
pub fn present_value_curve_sensitivity_cash(
    swaption: &SwaptionCash,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<CurveSensitivity> {
    let t = cash_terms(swaption, bundle, config)?;
    let factor = position_sign(swaption.is_long()) * t.notional;
    let price = t.pricing.adjoint.price;

    // Backward sweep
    let df_bar = factor * t.annuity[0] * price;
    let forward_bar =
        factor * t.df_settle * (t.annuity[1] * price + t.annuity[0] * t.pricing.adjoint.forward);

    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(
        &mut sensitivity,
        &t.funding,
        swaption.settlement_time(),
        t.df_settle,
        df_bar,
    );
    let rate_sensitivity =
        forward_swap_rate_curve_sensitivity(swaption.underlying(), bundle.curves())?
            .multiplied_by(forward_bar);
    Ok(sensitivity.plus(&rate_sensitivity))
}

/// SABR parameter sensitivity of a cash-settled swaption.
pub fn present_value_sabr_sensitivity_cash(
    swaption: &SwaptionCash,
    bundle: &SabrDataBundle,
    config: &PricingConfig,
) -> PricingResult<SabrSensitivity> {
    let t = cash_terms(swaption, bundle, config)?;
    let factor = position_sign(swaption.is_long()) * t.notional * t.df_settle * t.annuity[0];
    let a = t.pricing.adjoint;
    Ok(SabrSensitivity::of(
        swaption.expiry_time(),
        swaption.tenor(),
        factor * a.alpha,
        factor * a.rho,
        factor * a.nu,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::swap;
    use crate::methods::discounting::test_support::{assert_nodes_match, curves, FORWARD, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;
    use pricer_models::analytical::Black;
    use pricer_models::models::{SabrParameter, SabrParameterSurface, SabrParameters};

    const NOTIONAL: f64 = 1e8;
    const EXPIRY: f64 = 4.99;

    fn parameters() -> SabrParameters {
        SabrParameters::new(0.05, 0.5, -0.25, 0.5).unwrap()
    }

    fn bundle() -> SabrDataBundle {
        SabrDataBundle::new(curves(), SabrParameterSurface::constant(parameters()))
    }

    fn underlying(strike: f64, is_payer: bool) -> Swap {
Swap::fixed_ibor(
            Currency::USD,
            5.0,
            5.0,
            1,
            4,
            NOTIONAL,
            strike,
            is_payer,
            FUNDING,
            FORWARD,
        )
        .unwrap()
    }

    fn physical(strike: f64, is_payer: bool, is_long: bool) -> SwaptionPhysical {
        SwaptionPhysical::new(underlying(strike, is_payer), EXPIRY, is_long).unwrap()
    }

    fn cash(strike: f64, is_payer: bool, is_long: bool) -> SwaptionCash {
        SwaptionCash::new(underlying(strike, is_payer), EXPIRY, 5.0, is_long).unwrap()
    }

    fn config() -> PricingConfig {
        PricingConfig::default()
    }

    const PARAMETERS: [SabrParameter; 3] =
        [SabrParameter::Alpha, SabrParameter::Rho, SabrParameter::Nu];

    /// Central difference of `pv` under a parallel shift of one surface parameter.
    fn surface_fd(
        bundle: &SabrDataBundle,
        parameter: SabrParameter,
        pv: impl Fn(&SabrDataBundle) -> f64,
    ) -> f64 {
        let h = 1e-6;
        let at = |shift: f64| {
            pv(&bundle.with_surface(bundle.surface().with_parallel_shift(parameter, shift)))
        };
        (at(h) - at(-h)) / (2.0 * h)
    }

    fn parameter_surface(
        sensitivity: &SabrSensitivity,
        parameter: SabrParameter,
    ) -> &SurfaceValue {
        match parameter {
            SabrParameter::Alpha => &sensitivity.alpha,
            SabrParameter::Rho => &sensitivity.rho,
            SabrParameter::Nu => &sensitivity.nu,
        }
    }

    // ==========================================================
    // Physical delivery
    // ==========================================================

    #[test]
    fn test_physical_below_cutoff_is_black_with_sabr_volatility() {
        let bundle = bundle();
        let swaption = physical(0.03, true, true);
        let forward = forward_swap_rate(swaption.underlying(), bundle.curves()).unwrap();
        let pvbp = fixed_leg_pvbp(swaption.underlying().first_leg(), bundle.curves()).unwrap();
        let vol = parameters().volatility(forward, 0.03, EXPIRY).unwrap();
        let expected = pvbp.abs() * Black::new(forward, vol).unwrap().price(0.03, EXPIRY, true);
        let pv = present_value_physical(&swaption, &bundle, &config()).unwrap();
        assert_eq!(pv.currency(), Currency::USD);
        assert_relative_eq!(pv.amount(), expected, max_relative = 1e-10);
    }

    #[test]
    fn test_physical_long_short_parity() {
        let bundle = bundle();
        let long =
            present_value_physical(&physical(0.035, false, true), &bundle, &config()).unwrap();
        let short =
            present_value_physical(&physical(0.035, false, false), &bundle, &config()).unwrap();
        assert!(long.amount() > 0.0);
        assert_relative_eq!(long.amount() + short.amount(), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_physical_payer_receiver_parity() {
        let bundle = bundle();
        let strike = 0.036;
        let payer =
            present_value_physical(&physical(strike, true, true), &bundle, &config()).unwrap();
        let receiver =
            present_value_physical(&physical(strike, false, true), &bundle, &config()).unwrap();
        let swap_pv = swap::present_value(&underlying(strike, true), bundle.curves()).unwrap();
        assert_relative_eq!(payer.amount() - receiver.amount(), swap_pv.amount(), epsilon = 1e-2);
    }

    #[test]
    fn test_strike_above_cutoff_uses_tail() {
        let bundle = bundle();
        let near = present_value_physical(&physical(0.07, true, true), &bundle, &config()).unwrap();
        let tail = present_value_physical(&physical(0.10, true, true), &bundle, &config()).unwrap();
        assert!(tail.amount() > 0.0 && tail.amount() < near.amount());
        let higher_cutoff = config().with_sabr_cutoff_strike(0.12);
        let plain =
            present_value_physical(&physical(0.10, true, true), &bundle, &higher_cutoff).unwrap();
        assert!((plain.amount() - tail.amount()).abs() > 0.0);
    }

    #[test]
    fn test_physical_curve_sensitivity_against_node_bumps() {
        let bundle = bundle();
        // below and above the 0.08 cutoff
        for strike in [0.03, 0.10] {
            for (is_payer, is_long) in [(true, true), (false, false)] {
                let swaption = physical(strike, is_payer, is_long);
                let sensitivity =
                    present_value_curve_sensitivity_physical(&swaption, &bundle, &config())
                        .unwrap();
                let tolerance = 1e-5 * NOTIONAL;
                let expected = [FUNDING, FORWARD];
                assert_nodes_match(&sensitivity, bundle.curves(), &expected, tolerance, |c| {
                    let bumped = bundle.with_curves(c.clone());
                    present_value_physical(&swaption, &bumped, &config()).unwrap().amount()
                });
            }
        }
    }

    #[test]
    fn test_physical_sabr_sensitivity_against_surface_shifts() {
        let bundle = bundle();
        for strike in [0.03, 0.10] {
            let swaption = physical(strike, false, true);
            let sensitivity =
                present_value_sabr_sensitivity_physical(&swaption, &bundle, &config()).unwrap();
            assert_eq!(sensitivity.rho.len(), 1);
            for parameter in PARAMETERS {
                let fd = surface_fd(&bundle, parameter, |b| {
                    present_value_physical(&swaption, b, &config()).unwrap().amount()
                });
                let computed =
                    parameter_surface(&sensitivity, parameter).value(EXPIRY, swaption.tenor());
                assert_relative_eq!(computed, fd, epsilon = 1e-2, max_relative = 1e-5);
            }
        }
    }

    // ==========================================================
    // Cash settlement
    // ==========================================================

    #[test]
    fn test_cash_explicit_formula() {
        let bundle = bundle();
        let swaption = cash(0.032, true, true);
        let forward = forward_swap_rate(swaption.underlying(), bundle.curves()).unwrap();
        let vol = parameters().volatility(forward, 0.032, EXPIRY).unwrap();
        let price = Black::new(forward, vol).unwrap().price(0.032, EXPIRY, true);
        let df = discount_factor(bundle.curves(), FUNDING, 5.0).unwrap();
        let annuity = swap::cash_annuity(forward, 1.0, 5);
        let pv = present_value_cash(&swaption, &bundle, &config()).unwrap();
        assert_relative_eq!(pv.amount(), NOTIONAL * df * annuity * price, max_relative = 1e-10);
    }

    #[test]
    fn test_cash_curve_sensitivity_against_node_bumps() {
        let bundle = bundle();
        for strike in [0.03, 0.10] {
            for (is_payer, is_long) in [(true, false), (false, true)] {
                let swaption = cash(strike, is_payer, is_long);
                let sensitivity =
                    present_value_curve_sensitivity_cash(&swaption, &bundle, &config()).unwrap();
                let tolerance = 1e-5 * NOTIONAL;
                let expected = [FUNDING, FORWARD];
                assert_nodes_match(&sensitivity, bundle.curves(), &expected, tolerance, |c| {
                    let bumped = bundle.with_curves(c.clone());
                    present_value_cash(&swaption, &bumped, &config()).unwrap().amount()
                });
            }
        }
    }

    #[test]
    fn test_cash_sabr_sensitivity_against_surface_shifts() {
        let bundle = bundle();
        for strike in [0.03, 0.10] {
            let swaption = cash(strike, true, true);
            let sensitivity =
                present_value_sabr_sensitivity_cash(&swaption, &bundle, &config()).unwrap();
            for parameter in PARAMETERS {
                let fd = surface_fd(&bundle, parameter, |b| {
                    present_value_cash(&swaption, b, &config()).unwrap().amount()
                });
                let computed = parameter_surface(&sensitivity, parameter).total();
                assert_relative_eq!(computed, fd, epsilon = 1e-2, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_sabr_sensitivity_algebra() {
        let a = SabrSensitivity::of(5.0, 5.0, 1.0, 2.0, 3.0);
        let b = SabrSensitivity::of(5.0, 5.0, 1.0, 1.0, 1.0).multiplied_by(2.0);
        let sum = a.plus(&b);
        assert_eq!(sum.alpha.value(5.0, 5.0), 3.0);
        assert_eq!(sum.rho.value(5.0, 5.0), 4.0);
        assert_eq!(sum.nu.value(5.0, 5.0), 5.0);
    }
}
