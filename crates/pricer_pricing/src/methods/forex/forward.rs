//! FX forwards: each payment discounted on its own curve.

use pricer_core::market_data::CurveBundle;
use pricer_core::sensitivity::MultiCurrencyCurveSensitivity;
use pricer_core::types::{MultiCurrencyAmount, PricingResult};
use pricer_models::instruments::fx::Forex;

use crate::methods::discounting::coupon;

/// Present value: one amount per currency.
pub fn present_value(forex: &Forex, curves: &CurveBundle) -> PricingResult<MultiCurrencyAmount> {
    let pv1 = coupon::present_value_payment_fixed(forex.payment_currency1(), curves)?;
    let pv2 = coupon::present_value_payment_fixed(forex.payment_currency2(), curves)?;
    Ok(MultiCurrencyAmount::from(pv1).plus(pv2))
}

/// Currency exposure; equal to the present value for a forward.
pub fn currency_exposure(
    forex: &Forex,
    curves: &CurveBundle,
) -> PricingResult<MultiCurrencyAmount> {
    present_value(forex, curves)
}

/// Curve sensitivity of each payment, in its own currency.
pub fn present_value_curve_sensitivity(
    forex: &Forex,
    curves: &CurveBundle,
) -> PricingResult<MultiCurrencyCurveSensitivity> {
    let s1 =
        coupon::present_value_curve_sensitivity_payment_fixed(forex.payment_currency1(), curves)?;
    let s2 =
        coupon::present_value_curve_sensitivity_payment_fixed(forex.payment_currency2(), curves)?;
    Ok(MultiCurrencyCurveSensitivity::of(forex.currency1(), s1).plus(forex.currency2(), s2))
}
