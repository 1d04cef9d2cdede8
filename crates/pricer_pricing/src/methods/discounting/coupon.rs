//! Fixed payments and coupons.

use pricer_core::market_data::CurveBundle;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{CurrencyAmount, PricingResult};
use pricer_models::instruments::rates::{CouponFixed, CouponIbor, PaymentFixed};
use tracing::trace;

use super::{add_discount_node, add_forward_rate_nodes, discount_factor, forward_rate};

/// `A · P(t)`.
pub fn present_value_payment_fixed(
    payment: &PaymentFixed,
    curves: &CurveBundle,
) -> PricingResult<CurrencyAmount> {
    let df = discount_factor(curves, payment.funding_curve(), payment.payment_time())?;
    Ok(CurrencyAmount::new(payment.currency(), payment.amount() * df))
}

/// Funding curve sensitivity of a fixed payment.
pub fn present_value_curve_sensitivity_payment_fixed(
    payment: &PaymentFixed,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let t = payment.payment_time();
    let df = discount_factor(curves, payment.funding_curve(), t)?;
    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(&mut sensitivity, payment.funding_curve(), t, df, payment.amount());
    Ok(sensitivity)
}

/// `N · τ · K · P(t)`.
pub fn present_value_coupon_fixed(
    coupon: &CouponFixed,
    curves: &CurveBundle,
) -> PricingResult<CurrencyAmount> {
    let df = discount_factor(curves, coupon.funding_curve(), coupon.payment_time())?;
    Ok(CurrencyAmount::new(coupon.currency(), coupon.amount() * df))
}

/// Funding curve sensitivity of a fixed coupon.
pub fn present_value_curve_sensitivity_coupon_fixed(
    coupon: &CouponFixed,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let t = coupon.payment_time();
    let df = discount_factor(curves, coupon.funding_curve(), t)?;
    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(&mut sensitivity, coupon.funding_curve(), t, df, coupon.amount());
    Ok(sensitivity)
}

/// Value of one unit of rate on a fixed coupon: `N · τ · P(t)`.
pub fn present_value_basis_point_coupon_fixed(
    coupon: &CouponFixed,
    curves: &CurveBundle,
) -> PricingResult<f64> {
    let df = discount_factor(curves, coupon.funding_curve(), coupon.payment_time())?;
    Ok(coupon.notional() * coupon.payment_year_fraction() * df)
}

/// Forward rate of the coupon's fixing period on the forward curve.
pub fn forward_rate_coupon_ibor(coupon: &CouponIbor, curves: &CurveBundle) -> PricingResult<f64> {
    forward_rate(
        curves,
        coupon.forward_curve(),
        coupon.fixing_period_start_time(),
        coupon.fixing_period_end_time(),
        coupon.fixing_year_fraction(),
    )
}

/// Forward curve sensitivity of [`forward_rate_coupon_ibor`].
pub fn forward_rate_curve_sensitivity_coupon_ibor(
    coupon: &CouponIbor,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let mut sensitivity = CurveSensitivity::new();
    add_forward_rate_nodes(
        &mut sensitivity,
        curves,
        coupon.forward_curve(),
        coupon.fixing_period_start_time(),
        coupon.fixing_period_end_time(),
        coupon.fixing_year_fraction(),
        1.0,
    )?;
    Ok(sensitivity)
}

/// `N · τ · (F + s) · P(t_p)`.
pub fn present_value_coupon_ibor(
    coupon: &CouponIbor,
    curves: &CurveBundle,
) -> PricingResult<CurrencyAmount> {
    let forward = forward_rate_coupon_ibor(coupon, curves)?;
    let df = discount_factor(curves, coupon.funding_curve(), coupon.payment_time())?;
    trace!(forward, df, "ibor coupon");
    let pv = coupon.notional() * coupon.payment_year_fraction() * (forward + coupon.spread()) * df;
    Ok(CurrencyAmount::new(coupon.currency(), pv))
}

/// Funding and forward curve sensitivity of an ibor coupon.
pub fn present_value_curve_sensitivity_coupon_ibor(
    coupon: &CouponIbor,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let forward = forward_rate_coupon_ibor(coupon, curves)?;
    let t = coupon.payment_time();
    let df = discount_factor(curves, coupon.funding_curve(), t)?;
    let accrued = coupon.notional() * coupon.payment_year_fraction();

    // Backward sweep
    let df_bar = accrued * (forward + coupon.spread());
    let forward_bar = accrued * df;

    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(&mut sensitivity, coupon.funding_curve(), t, df, df_bar);
    add_forward_rate_nodes(
        &mut sensitivity,
        curves,
        coupon.forward_curve(),
        coupon.fixing_period_start_time(),
        coupon.fixing_period_end_time(),
        coupon.fixing_year_fraction(),
        forward_bar,
    )?;
    Ok(sensitivity)
}

/// Value of one unit of spread on an ibor coupon: `N · τ · P(t_p)`.
pub fn present_value_basis_point_coupon_ibor(
    coupon: &CouponIbor,
    curves: &CurveBundle,
) -> PricingResult<f64> {
    let df = discount_factor(curves, coupon.funding_curve(), coupon.payment_time())?;
    Ok(coupon.notional() * coupon.payment_year_fraction() * df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::test_support::{curves, node_fd, parallel_fd, FORWARD, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;

    fn ibor(spread: f64) -> CouponIbor {
        CouponIbor::new(
            Currency::USD,
            2.25,
            0.25,
            1e6,
            1.98,
            2.0,
            2.25,
            0.252,
            spread,
            FUNDING,
            FORWARD,
        )
        .unwrap()
    }

    // ==========================================================
    // Fixed flows
    // ==========================================================

    #[test]
    fn test_fixed_coupon_equals_payment_of_its_amount() {
        let curves = curves();
        let coupon = CouponFixed::new(Currency::USD, 3.0, 0.5, 1e6, 0.04, FUNDING).unwrap();
        let payment = PaymentFixed::new(Currency::USD, 3.0, coupon.amount(), FUNDING).unwrap();
        assert_relative_eq!(
            present_value_coupon_fixed(&coupon, &curves).unwrap().amount(),
            present_value_payment_fixed(&payment, &curves).unwrap().amount(),
            max_relative = 1e-15
        );
        let pvbp = present_value_basis_point_coupon_fixed(&coupon, &curves).unwrap();
        let df = discount_factor(&curves, FUNDING, 3.0).unwrap();
        assert_relative_eq!(pvbp * 0.04, coupon.amount() * df, max_relative = 1e-12);
    }

    #[test]
    fn test_fixed_payment_sensitivity() {
        let curves = curves();
        let payment = PaymentFixed::new(Currency::USD, 5.0, -2e6, FUNDING).unwrap();
        let sensitivity = present_value_curve_sensitivity_payment_fixed(&payment, &curves).unwrap();
        let fd = parallel_fd(&curves, FUNDING, |c| {
            present_value_payment_fixed(&payment, c).unwrap().amount()
        });
        assert_relative_eq!(sensitivity.total(FUNDING), fd, epsilon = 1e-2);
    }

    // ==========================================================
    // Ibor coupon
    // ==========================================================

    #[test]
    fn test_ibor_coupon_present_value() {
        let curves = curves();
        let coupon = ibor(0.001);
        let forward = forward_rate_coupon_ibor(&coupon, &curves).unwrap();
        let df = discount_factor(&curves, FUNDING, 2.25).unwrap();
        let pv = present_value_coupon_ibor(&coupon, &curves).unwrap();
        assert_eq!(pv.currency(), Currency::USD);
        assert_relative_eq!(pv.amount(), 1e6 * 0.25 * (forward + 0.001) * df, max_relative = 1e-14);
        assert!(forward > 0.02 && forward < 0.04);
    }

    #[test]
    fn test_ibor_spread_pvbp() {
        let curves = curves();
        let diff = present_value_coupon_ibor(&ibor(0.0011), &curves).unwrap().amount()
            - present_value_coupon_ibor(&ibor(0.0010), &curves).unwrap().amount();
        let pvbp = present_value_basis_point_coupon_ibor(&ibor(0.0), &curves).unwrap();
        assert_relative_eq!(diff, pvbp * 1e-4, max_relative = 1e-8);
    }

    #[test]
    fn test_ibor_sensitivity_against_node_bumps() {
        let curves = curves();
        let coupon = ibor(0.002);
        let pv = |c: &CurveBundle| present_value_coupon_ibor(&coupon, c).unwrap().amount();
        let sensitivity = present_value_curve_sensitivity_coupon_ibor(&coupon, &curves).unwrap();
        for curve in [FUNDING, FORWARD] {
            for (time, value) in sensitivity.to_pairs(curve) {
                assert_relative_eq!(value, node_fd(&curves, curve, time, pv), epsilon = 1e-4);
            }
        }
        assert_eq!(sensitivity.to_pairs(FUNDING).len(), 1);
        assert_eq!(sensitivity.to_pairs(FORWARD).len(), 2);
    }

    #[test]
    fn test_forward_rate_sensitivity_against_node_bumps() {
        let curves = curves();
        let coupon = ibor(0.0);
        let sensitivity = forward_rate_curve_sensitivity_coupon_ibor(&coupon, &curves).unwrap();
        for (time, value) in sensitivity.to_pairs(FORWARD) {
            let fd =
                node_fd(&curves, FORWARD, time, |c| forward_rate_coupon_ibor(&coupon, c).unwrap());
            assert_relative_eq!(value, fd, epsilon = 1e-8);
        }
        assert!(sensitivity.to_pairs(FUNDING).is_empty());
    }
}
