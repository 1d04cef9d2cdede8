//! Annuities and swaps.
//!
//! Besides plain valuation this module holds the fixed-leg quantities the
//! swaption methods build on: the leg PVBP `W = Σ τ·N·P(t)`, the forward
//! swap rate `S = −PV(ibor leg)/W` and the cash annuity used by
//! cash-settled swaptions.

use pricer_core::market_data::CurveBundle;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{CurrencyAmount, PricingError, PricingResult};
use pricer_models::instruments::rates::{Annuity, Payment, Swap};
use tracing::{debug, trace};

use super::{
    add_discount_node, coupon, discount_factor, fra, payment_curve_sensitivity,
    payment_present_value,
};

/// Present value of an annuity: sum over its payments.
pub fn present_value_annuity(
    annuity: &Annuity,
    curves: &CurveBundle,
) -> PricingResult<CurrencyAmount> {
    let mut pv = 0.0;
    for payment in annuity.payments() {
        pv += payment_present_value(payment, curves)?;
    }
    Ok(CurrencyAmount::new(annuity.currency(), pv))
}

/// Curve sensitivity of an annuity.
pub fn present_value_curve_sensitivity_annuity(
    annuity: &Annuity,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    annuity
        .payments()
        .iter()
        .try_fold(CurveSensitivity::new(), |acc, payment| {
            Ok(acc.plus(&payment_curve_sensitivity(payment, curves)?))
        })
}

/// Present value of a swap: both legs.
pub fn present_value(swap: &Swap, curves: &CurveBundle) -> PricingResult<CurrencyAmount> {
    debug!(
        currency = %swap.currency(),
        first = swap.first_leg().len(),
        second = swap.second_leg().len(),
        "swap present value"
    );
    let first = present_value_annuity(swap.first_leg(), curves)?;
    let second = present_value_annuity(swap.second_leg(), curves)?;
    Ok(first.plus(second)?)
}

/// Curve sensitivity of a swap.
pub fn present_value_curve_sensitivity(
    swap: &Swap,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    Ok(present_value_curve_sensitivity_annuity(swap.first_leg(), curves)?
        .plus(&present_value_curve_sensitivity_annuity(swap.second_leg(), curves)?))
}

/// PVBP of one payment: fixed payments have no rate.
pub fn present_value_basis_point_payment(
    payment: &Payment,
    curves: &CurveBundle,
) -> PricingResult<f64> {
    match payment {
        Payment::Fixed(_) => Ok(0.0),
        Payment::CouponFixed(c) => coupon::present_value_basis_point_coupon_fixed(c, curves),
        Payment::CouponIbor(c) => coupon::present_value_basis_point_coupon_ibor(c, curves),
        Payment::ForwardRateAgreement(f) => fra::present_value_basis_point(f, curves),
    }
}

/// PVBP of an annuity: sum over its payments.
pub fn present_value_basis_point_annuity(
    annuity: &Annuity,
    curves: &CurveBundle,
) -> PricingResult<f64> {
    annuity
        .payments()
        .iter()
        .try_fold(0.0, |acc, payment| Ok(acc + present_value_basis_point_payment(payment, curves)?))
}

/// PVBP of the fixed coupons of a leg, `W = Σ τ·N·P(t)`. The sign follows
/// the notional, so a paid leg has `W < 0`.
pub fn fixed_leg_pvbp(leg: &Annuity, curves: &CurveBundle) -> PricingResult<f64> {
    leg.fixed_coupons().try_fold(0.0, |acc, c| {
        Ok(acc + coupon::present_value_basis_point_coupon_fixed(c, curves)?)
    })
}

/// Curve sensitivity of [`fixed_leg_pvbp`].
pub fn fixed_leg_pvbp_curve_sensitivity(
    leg: &Annuity,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let mut sensitivity = CurveSensitivity::new();
    for c in leg.fixed_coupons() {
        let t = c.payment_time();
        let df = discount_factor(curves, c.funding_curve(), t)?;
        add_discount_node(
            &mut sensitivity,
            c.funding_curve(),
            t,
            df,
            c.payment_year_fraction() * c.notional(),
        );
    }
    Ok(sensitivity)
}

fn check_fixed_ibor(swap: &Swap) -> PricingResult<()> {
    if swap.first_leg().is_fixed_coupon_leg() && swap.second_leg().is_ibor_coupon_leg() {
        Ok(())
    } else {
        Err(PricingError::InvalidInput(
            "forward swap rate needs a fixed first leg and an ibor second leg".to_string(),
        ))
    }
}

/// Forward swap rate `−PV(ibor leg)/PVBP(fixed leg)`.
pub fn forward_swap_rate(swap: &Swap, curves: &CurveBundle) -> PricingResult<f64> {
    check_fixed_ibor(swap)?;
    let pvbp = fixed_leg_pvbp(swap.first_leg(), curves)?;
    if pvbp == 0.0 {
        return Err(PricingError::InvalidInput("fixed leg has zero PVBP".to_string()));
    }
    let ibor = present_value_annuity(swap.second_leg(), curves)?.amount();
    let rate = -ibor / pvbp;
    trace!(rate, pvbp, "forward swap rate");
    Ok(rate)
}

/// Curve sensitivity of [`forward_swap_rate`]:
/// `∂S = −(∂U + S·∂W)/W`.
pub fn forward_swap_rate_curve_sensitivity(
    swap: &Swap,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let rate = forward_swap_rate(swap, curves)?;
    let pvbp = fixed_leg_pvbp(swap.first_leg(), curves)?;
    let ibor_sensitivity = present_value_curve_sensitivity_annuity(swap.second_leg(), curves)?;
    let pvbp_sensitivity = fixed_leg_pvbp_curve_sensitivity(swap.first_leg(), curves)?;
    Ok(ibor_sensitivity
        .plus(&pvbp_sensitivity.multiplied_by(rate))
        .multiplied_by(-1.0 / pvbp))
}

/// Cash annuity `Σ_{i=1..n} δ/(1 + δ·S)^i`.
pub fn cash_annuity(rate: f64, year_fraction: f64, periods: usize) -> f64 {
    cash_annuity_derivatives(rate, year_fraction, periods)[0]
}

/// Cash annuity and its first three derivatives in the rate.
pub fn cash_annuity_derivatives(rate: f64, year_fraction: f64, periods: usize) -> [f64; 4] {
    let delta = year_fraction;
    let base = 1.0 / (1.0 + delta * rate);
    let mut result = [0.0; 4];
    let mut power = 1.0;
    for i in 1..=periods {
        power *= base;
        let k = i as f64;
        result[0] += delta * power;
        result[1] -= k * delta * delta * power * base;
        result[2] += k * (k + 1.0) * delta.powi(3) * power * base * base;
        result[3] -= k * (k + 1.0) * (k + 2.0) * delta.powi(4) * power * base.powi(3);
    }
    result
}

/// Year fraction and number of coupons of a fixed leg, for the cash annuity.
pub fn fixed_leg_schedule(leg: &Annuity) -> PricingResult<(f64, usize)> {
    let mut coupons = leg.fixed_coupons();
    let first = coupons
        .next()
        .ok_or_else(|| PricingError::InvalidInput("leg has no fixed coupon".to_string()))?;
    Ok((first.payment_year_fraction(), 1 + coupons.count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::test_support::{curves, node_fd, parallel_fd, FORWARD, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;
    use pricer_models::instruments::rates::PaymentFixed;

    fn swap(rate: f64, is_payer: bool) -> Swap {
        Swap::fixed_ibor(Currency::USD, 1.0, 5.0, 1, 4, 1e8, rate, is_payer, FUNDING, FORWARD)
            .unwrap()
    }

    // ==========================================================
    // Swap valuation
    // ==========================================================

    #[test]
    fn test_swap_at_forward_rate_is_worth_zero() {
        let curves = curves();
        let rate = forward_swap_rate(&swap(0.03, true), &curves).unwrap();
        assert!(rate > 0.02 && rate < 0.05);
        let pv = present_value(&swap(rate, true), &curves).unwrap();
        assert_relative_eq!(pv.amount(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_forward_rate_does_not_depend_on_side() {
        let curves = curves();
        let payer = forward_swap_rate(&swap(0.03, true), &curves).unwrap();
        let receiver = forward_swap_rate(&swap(0.03, false), &curves).unwrap();
        assert_relative_eq!(payer, receiver, max_relative = 1e-14);
    }

    #[test]
    fn test_payer_plus_receiver_is_zero() {
        let curves = curves();
        let payer = present_value(&swap(0.035, true), &curves).unwrap().amount();
        let receiver = present_value(&swap(0.035, false), &curves).unwrap().amount();
        assert_relative_eq!(payer + receiver, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fixed_leg_pvbp_sign_follows_notional() {
        let curves = curves();
        let payer = fixed_leg_pvbp(swap(0.03, true).first_leg(), &curves).unwrap();
        let receiver = fixed_leg_pvbp(swap(0.03, false).first_leg(), &curves).unwrap();
        assert!(payer < 0.0);
        assert_relative_eq!(payer, -receiver, max_relative = 1e-14);
        let pv_diff = present_value(&swap(0.0301, false), &curves).unwrap().amount()
            - present_value(&swap(0.03, false), &curves).unwrap().amount();
        assert_relative_eq!(pv_diff, receiver * 1e-4, max_relative = 1e-8);
    }

    #[test]
    fn test_annuity_pvbp_ignores_fixed_payments() {
        let curves = curves();
        let leg = Annuity::new(vec![
            PaymentFixed::new(Currency::USD, 2.0, 1e6, FUNDING).unwrap().into(),
        ])
        .unwrap();
        assert_eq!(present_value_basis_point_annuity(&leg, &curves).unwrap(), 0.0);
    }

    // ==========================================================
    // Sensitivities
    // ==========================================================

    #[test]
    fn test_swap_sensitivity_against_parallel_shifts() {
        let curves = curves();
        let s = swap(0.03, true);
        let sensitivity = present_value_curve_sensitivity(&s, &curves).unwrap();
        for curve in [FUNDING, FORWARD] {
            let fd = parallel_fd(&curves, curve, |c| present_value(&s, c).unwrap().amount());
            assert_relative_eq!(sensitivity.total(curve), fd, epsilon = 1e-1 + fd.abs() * 1e-6);
        }
    }

    #[test]
    fn test_forward_rate_sensitivity_against_node_bumps() {
        let curves = curves();
        let s = swap(0.03, false);
        let sensitivity = forward_swap_rate_curve_sensitivity(&s, &curves).unwrap();
        for curve in [FUNDING, FORWARD] {
            for (time, value) in sensitivity.to_pairs(curve) {
                let fd = node_fd(&curves, curve, time, |c| forward_swap_rate(&s, c).unwrap());
                assert_relative_eq!(value, fd, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_forward_rate_needs_fixed_ibor_shape() {
        let s = swap(0.03, true);
        let reversed = Swap::new(s.second_leg().clone(), s.first_leg().clone()).unwrap();
        assert!(matches!(
            forward_swap_rate(&reversed, &curves()),
            Err(PricingError::InvalidInput(_))
        ));
    }

    // ==========================================================
    // Cash annuity
    // ==========================================================

    #[test]
    fn test_cash_annuity_closed_form() {
        let (rate, delta, n): (f64, f64, _) = (0.04, 0.5, 10);
        let closed = (1.0 - (1.0 + delta * rate).powi(-(n as i32))) / rate;
        assert_relative_eq!(cash_annuity(rate, delta, n), closed, max_relative = 1e-12);
    }

    #[test]
    fn test_cash_annuity_derivatives_against_differences() {
        let (rate, delta, n) = (0.035, 1.0, 5);
        let h = 1e-5;
        let up = cash_annuity_derivatives(rate + h, delta, n);
        let down = cash_annuity_derivatives(rate - h, delta, n);
        let mid = cash_annuity_derivatives(rate, delta, n);
        for k in 0..3 {
            let fd = (up[k] - down[k]) / (2.0 * h);
            assert_relative_eq!(mid[k + 1], fd, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_fixed_leg_schedule() {
        let s = swap(0.03, true);
        let (delta, n) = fixed_leg_schedule(s.first_leg()).unwrap();
        assert_eq!(delta, 1.0);
        assert_eq!(n, 5);
        assert!(fixed_leg_schedule(s.second_leg()).is_err());
    }
}
