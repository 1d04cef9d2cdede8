//! Deposits.
//!
//! The notional is paid at the start and returned with interest at the
//! end: `PV = N·(1 + τ·r)·P(t_e) − N·P(t_s)`.

use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::market_data::CurveBundle;
use pricer_core::types::{CurrencyAmount, PricingResult};
use pricer_models::instruments::rates::Cash;
use tracing::debug;

use super::{add_discount_node, discount_factor};

/// Present value.
pub fn present_value(cash: &Cash, curves: &CurveBundle) -> PricingResult<CurrencyAmount> {
    debug!(curve = cash.funding_curve(), end = cash.end_time(), "cash present value");
    let curve = cash.funding_curve();
    let df_start = discount_factor(curves, curve, cash.start_time())?;
    let df_end = discount_factor(curves, curve, cash.end_time())?;
    let n = cash.notional();
    let pv = (n + cash.interest_amount()) * df_end - n * df_start;
    Ok(CurrencyAmount::new(cash.currency(), pv))
}

/// Present value sensitivity to the funding curve.
pub fn present_value_curve_sensitivity(
    cash: &Cash,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let curve = cash.funding_curve();
    let df_start = discount_factor(curves, curve, cash.start_time())?;
    let df_end = discount_factor(curves, curve, cash.end_time())?;
    let n = cash.notional();
    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(&mut sensitivity, curve, cash.end_time(), df_end, n + cash.interest_amount());
    add_discount_node(&mut sensitivity, curve, cash.start_time(), df_start, -n);
    Ok(sensitivity)
}

/// Deposit rate giving a zero present value: `(P(t_s)/P(t_e) − 1)/τ`.
pub fn par_rate(cash: &Cash, curves: &CurveBundle) -> PricingResult<f64> {
    let curve = cash.funding_curve();
    let df_start = discount_factor(curves, curve, cash.start_time())?;
    let df_end = discount_factor(curves, curve, cash.end_time())?;
    Ok((df_start / df_end - 1.0) / cash.accrual_factor())
}

/// Sensitivity of [`par_rate`] to the funding curve.
pub fn par_rate_curve_sensitivity(
    cash: &Cash,
    curves: &CurveBundle,
) -> PricingResult<CurveSensitivity> {
    let curve = cash.funding_curve();
    let tau = cash.accrual_factor();
    let df_start = discount_factor(curves, curve, cash.start_time())?;
    let df_end = discount_factor(curves, curve, cash.end_time())?;
    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(&mut sensitivity, curve, cash.start_time(), df_start, 1.0 / (tau * df_end));
    add_discount_node(
        &mut sensitivity,
        curve,
        cash.end_time(),
        df_end,
        -df_start / (tau * df_end * df_end),
    );
    Ok(sensitivity)
}

/// Present value of one basis point of deposit rate, per unit rate.
pub fn present_value_basis_point(cash: &Cash, curves: &CurveBundle) -> PricingResult<f64> {
    let df_end = discount_factor(curves, cash.funding_curve(), cash.end_time())?;
    Ok(df_end * cash.accrual_factor() * cash.notional())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::test_support::{curves, node_fd, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;

    fn deposit(rate: f64) -> Cash {
        Cash::new(Currency::USD, 0.5, 1.5, 1.0, 1e7, rate, FUNDING).unwrap()
    }

    #[test]
    fn test_par_rate_prices_to_zero() {
        let curves = curves();
        let rate = par_rate(&deposit(0.03), &curves).unwrap();
        let pv = present_value(&deposit(rate), &curves).unwrap();
        assert_relative_eq!(pv.amount(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_present_value_is_linear_in_rate() {
        let curves = curves();
        let pv1 = present_value(&deposit(0.03), &curves).unwrap().amount();
        let pv2 = present_value(&deposit(0.0301), &curves).unwrap().amount();
        let pvbp = present_value_basis_point(&deposit(0.03), &curves).unwrap();
        assert_relative_eq!(pv2 - pv1, pvbp * 1e-4, max_relative = 1e-9);
    }

    #[test]
    fn test_curve_sensitivity_against_node_bumps() {
        let curves = curves();
        let cash = deposit(0.03);
        let sensitivity = present_value_curve_sensitivity(&cash, &curves).unwrap();
        for (time, value) in sensitivity.to_pairs(FUNDING) {
            let fd = node_fd(&curves, FUNDING, time, |c| present_value(&cash, c).unwrap().amount());
            assert_relative_eq!(value, fd, epsilon = 1e-2);
        }
        assert_eq!(sensitivity.to_pairs(FUNDING).len(), 2);
    }

    #[test]
    fn test_par_rate_sensitivity_against_node_bumps() {
        let curves = curves();
        let cash = deposit(0.03);
        let sensitivity = par_rate_curve_sensitivity(&cash, &curves).unwrap();
        for (time, value) in sensitivity.to_pairs(FUNDING) {
            let fd = node_fd(&curves, FUNDING, time, |c| par_rate(&cash, c).unwrap());
            assert_relative_eq!(value, fd, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_missing_curve_is_an_error() {
        let cash = Cash::new(Currency::USD, 0.0, 1.0, 1.0, 1e6, 0.01, "Missing").unwrap();
        assert!(present_value(&cash, &curves()).is_err());
    }
}
