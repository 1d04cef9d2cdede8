//! Forward rate agreements.
//!
//! Settled at the start of the payment period with the discounted
//! difference: `PV = P_d(t_p)·τ·N·(F − K)/(1 + τ·F)`.

use pricer_core::market_data::CurveBundle;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{CurrencyAmount, PricingResult};
use pricer_models::instruments::rates::ForwardRateAgreement;
use tracing::{debug, trace};

use super::{add_discount_node, add_forward_rate_nodes, discount_factor, forward_rate};

/// Forward rate of the fixing period.
pub fn par_rate(fra: &ForwardRateAgreement, curves: &CurveBundle) -> PricingResult<f64> {
    forward_rate(
        curves,
        fra.forward_curve(),
        fra.fixing_period_start_time(),
        fra.fixing_period_end_time(),
        fra.fixing_year_fraction(),
    )
}

/// Forward curve sensitivity of [`par_rate`].
pub fn par_rate_curve_sensitivity(
    fra: &ForwardRateAgreement,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let mut sensitivity = CurveSensitivity::new();
    add_forward_rate_nodes(
        &mut sensitivity,
        curves,
        fra.forward_curve(),
        fra.fixing_period_start_time(),
        fra.fixing_period_end_time(),
        fra.fixing_year_fraction(),
        1.0,
    )?;
    Ok(sensitivity)
}

/// Present value.
pub fn present_value(
    fra: &ForwardRateAgreement,
    curves: &CurveBundle,
) -> PricingResult<CurrencyAmount> {
    debug!(
        funding = fra.funding_curve(),
        forward = fra.forward_curve(),
        "fra present value"
    );
    let forward = par_rate(fra, curves)?;
    let df = discount_factor(curves, fra.funding_curve(), fra.payment_time())?;
    trace!(forward, df, "fra forward");
    let tau = fra.payment_year_fraction();
    let pv = df * tau * fra.notional() * (forward - fra.fixed_rate()) / (1.0 + tau * forward);
    Ok(CurrencyAmount::new(fra.currency(), pv))
}

/// Funding and forward curve sensitivity.
pub fn present_value_curve_sensitivity(
    fra: &ForwardRateAgreement,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let forward = par_rate(fra, curves)?;
    let t = fra.payment_time();
    let df = discount_factor(curves, fra.funding_curve(), t)?;
    let tau = fra.payment_year_fraction();
    let n = fra.notional();
    let k = fra.fixed_rate();
    let denominator = 1.0 + tau * forward;

    // Backward sweep
    let df_bar = tau * n * (forward - k) / denominator;
    let forward_bar = df * tau * n * (1.0 + tau * k) / (denominator * denominator);

    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(&mut sensitivity, fra.funding_curve(), t, df, df_bar);
    add_forward_rate_nodes(
        &mut sensitivity,
        curves,
        fra.forward_curve(),
        fra.fixing_period_start_time(),
        fra.fixing_period_end_time(),
        fra.fixing_year_fraction(),
        forward_bar,
    )?;
    Ok(sensitivity)
}

/// Derivative of the present value with respect to the fixed rate.
pub fn present_value_coupon_sensitivity(
    fra: &ForwardRateAgreement,
    curves: &CurveBundle,
) -> PricingResult<f64> {
    let forward = par_rate(fra, curves)?;
    let df = discount_factor(curves, fra.funding_curve(), fra.payment_time())?;
    let tau = fra.payment_year_fraction();
    Ok(-df * tau * fra.notional() / (1.0 + tau * forward))
}

/// Present value of one unit of fixed rate, with the sign of a receiver.
///
/// Returns `+P_d(t_p)·τ·N/(1 + τ·F)`: positive for a positive notional, the
/// same sign as the PVBP of a fixed coupon paying the rate. It is the
/// negative of [`present_value_coupon_sensitivity`], which differentiates
/// the FRA value with respect to its strike.
pub fn present_value_basis_point(
    fra: &ForwardRateAgreement,
    curves: &CurveBundle,
) -> PricingResult<f64> {
    Ok(-present_value_coupon_sensitivity(fra, curves)?)
}
