//! Discounting method for linear instruments.
//!
//! Every cash flow is projected from the forward curve (if any) and
//! discounted on the funding curve. Curve sensitivities come from a
//! hand-written backward sweep: each discount factor adjoint `P̄` becomes
//! the zero-rate node value `-t·P(t)·P̄`.
//!
//! - [`cash`]: deposits
//! - [`coupon`]: fixed payments, fixed and ibor coupons
//! - [`fra`]: forward rate agreements
//! - [`swap`]: annuities, swaps, forward swap rate and annuity helpers

pub mod cash;
pub mod coupon;
pub mod fra;
pub mod swap;

use pricer_core::market_data::{CurveBundle, YieldCurve};
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::PricingResult;
use pricer_models::instruments::rates::Payment;

/// Discount factor of curve `name` at `time`.
#[inline]
pub(crate) fn discount_factor(curves: &CurveBundle, name: &str, time: f64) -> PricingResult<f64> {
    Ok(curves.get_curve(name)?.discount_factor(time)?)
}

/// Adds the zero-rate node for a discount factor adjoint.
#[inline]
pub(crate) fn add_discount_node(
    sensitivity: &mut CurveSensitivity,
    curve: &str,
    time: f64,
    discount_factor: f64,
    adjoint: f64,
) {
    sensitivity.add(curve, time, -time * discount_factor * adjoint);
}

/// Simply compounded forward rate of `curve` over `[start, end]`.
pub(crate) fn forward_rate(
    curves: &CurveBundle,
    curve: &str,
    start: f64,
    end: f64,
    year_fraction: f64,
) -> PricingResult<f64> {
    let df_start = discount_factor(curves, curve, start)?;
    let df_end = discount_factor(curves, curve, end)?;
    Ok((df_start / df_end - 1.0) / year_fraction)
}

/// Adds `forward_adjoint · ∂F/∂r` for the forward of [`forward_rate`].
pub(crate) fn add_forward_rate_nodes(
    sensitivity: &mut CurveSensitivity,
    curves: &CurveBundle,
    curve: &str,
    start: f64,
    end: f64,
    year_fraction: f64,
    forward_adjoint: f64,
) -> PricingResult<()> {
    let df_start = discount_factor(curves, curve, start)?;
    let df_end = discount_factor(curves, curve, end)?;
    let df_start_bar = forward_adjoint / (year_fraction * df_end);
    let df_end_bar = -forward_adjoint * df_start / (year_fraction * df_end * df_end);
    add_discount_node(sensitivity, curve, start, df_start, df_start_bar);
    add_discount_node(sensitivity, curve, end, df_end, df_end_bar);
    Ok(())
}

/// Present value of one payment of an annuity, in its currency.
pub fn payment_present_value(payment: &Payment, curves: &CurveBundle) -> PricingResult<f64> {
    let pv = match payment {
        Payment::Fixed(p) => coupon::present_value_payment_fixed(p, curves)?,
        Payment::CouponFixed(c) => coupon::present_value_coupon_fixed(c, curves)?,
        Payment::CouponIbor(c) => coupon::present_value_coupon_ibor(c, curves)?,
        Payment::ForwardRateAgreement(f) => fra::present_value(f, curves)?,
    };
    Ok(pv.amount())
}

/// Curve sensitivity of one payment of an annuity.
pub fn payment_curve_sensitivity(
    payment: &Payment,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    match payment {
        Payment::Fixed(p) => coupon::present_value_curve_sensitivity_payment_fixed(p, curves),
        Payment::CouponFixed(c) => coupon::present_value_curve_sensitivity_coupon_fixed(c, curves),
        Payment::CouponIbor(c) => coupon::present_value_curve_sensitivity_coupon_ibor(c, curves),
        Payment::ForwardRateAgreement(f) => fra::present_value_curve_sensitivity(f, curves),
    }
}
