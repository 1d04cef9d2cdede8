//! Black FX calculators.

use pricer_core::sensitivity::MultiCurrencyCurveSensitivity;
use pricer_core::types::{MultiCurrencyAmount, PricingError, PricingResult};
use pricer_models::instruments::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use pricer_models::instruments::rates::{
    Cash, CouponFixed, CouponIbor, ForwardRateAgreement, PaymentFixed, SwaptionCash,
    SwaptionPhysical,
};
use pricer_models::instruments::InstrumentVisitor;

use super::{
    delegate_linear, sum_amounts, sum_sensitivities, CurveSensitivityCalculator,
    PresentValueCalculator,
};
use crate::context::{CurveProvider, ForexSmileDataBundle};
use crate::methods::forex::{digital, forward, vanilla, ForexVolatilitySensitivity};

const PRESENT_VALUE_BLACK_FOREX: &str = "present value (Black FX)";
const CURRENCY_EXPOSURE_BLACK_FOREX: &str = "currency exposure (Black FX)";
const CURVE_SENSITIVITY_BLACK_FOREX: &str = "curve sensitivity (Black FX)";
const VOLATILITY_SENSITIVITY_BLACK_FOREX: &str = "volatility sensitivity (Black FX)";

/// Present value of FX options with Black and the delta smile.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueBlackForexCalculator;

impl InstrumentVisitor<ForexSmileDataBundle> for PresentValueBlackForexCalculator {
    type Output = MultiCurrencyAmount;

    fn calculation(&self) -> &'static str {
        PRESENT_VALUE_BLACK_FOREX
    }

    fn combine(&self, outputs: Vec<MultiCurrencyAmount>) -> PricingResult<MultiCurrencyAmount> {
        Ok(sum_amounts(outputs))
    }

    delegate_linear!(PresentValueCalculator, ForexSmileDataBundle);

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionCash", PRESENT_VALUE_BLACK_FOREX))
    }

    fn visit_swaption_physical(
        &self,
        _: &SwaptionPhysical,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionPhysical", PRESENT_VALUE_BLACK_FOREX))
    }

    fn visit_forex_option_vanilla(
        &self,
        option: &ForexOptionVanilla,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        vanilla::present_value(option, market)
    }

    fn visit_forex_option_digital(
        &self,
        option: &ForexOptionDigital,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        digital::present_value(option, market)
    }
}

/// Currency exposure: the amounts in each currency whose conversion at the
/// current spot gives the present value, with the spot sensitivity.
///
/// Single-currency instruments are exposed by their present value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyExposureBlackForexCalculator;

impl InstrumentVisitor<ForexSmileDataBundle> for CurrencyExposureBlackForexCalculator {
    type Output = MultiCurrencyAmount;

    fn calculation(&self) -> &'static str {
        CURRENCY_EXPOSURE_BLACK_FOREX
    }

    fn combine(&self, outputs: Vec<MultiCurrencyAmount>) -> PricingResult<MultiCurrencyAmount> {
        Ok(sum_amounts(outputs))
    }

    fn visit_cash(
        &self,
        cash: &Cash,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        PresentValueCalculator.visit_cash(cash, market)
    }

    fn visit_payment_fixed(
        &self,
        payment: &PaymentFixed,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        PresentValueCalculator.visit_payment_fixed(payment, market)
    }

    fn visit_coupon_fixed(
        &self,
        coupon: &CouponFixed,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        PresentValueCalculator.visit_coupon_fixed(coupon, market)
    }

    fn visit_coupon_ibor(
        &self,
        coupon: &CouponIbor,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        PresentValueCalculator.visit_coupon_ibor(coupon, market)
    }

    fn visit_forward_rate_agreement(
        &self,
        fra: &ForwardRateAgreement,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        PresentValueCalculator.visit_forward_rate_agreement(fra, market)
    }

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionCash", CURRENCY_EXPOSURE_BLACK_FOREX))
    }

    fn visit_swaption_physical(
        &self,
        _: &SwaptionPhysical,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionPhysical", CURRENCY_EXPOSURE_BLACK_FOREX))
    }

    fn visit_forex(
        &self,
        forex: &Forex,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        forward::currency_exposure(forex, market.curves())
    }

    fn visit_forex_option_vanilla(
        &self,
        option: &ForexOptionVanilla,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        vanilla::currency_exposure(option, market)
    }

    fn visit_forex_option_digital(
        &self,
        option: &ForexOptionDigital,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        digital::currency_exposure(option, market)
    }
}

/// Curve sensitivity of FX options, volatility frozen.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveSensitivityBlackForexCalculator;

impl InstrumentVisitor<ForexSmileDataBundle> for CurveSensitivityBlackForexCalculator {
    type Output = MultiCurrencyCurveSensitivity;

    fn calculation(&self) -> &'static str {
        CURVE_SENSITIVITY_BLACK_FOREX
    }

    fn combine(
        &self,
        outputs: Vec<MultiCurrencyCurveSensitivity>,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Ok(sum_sensitivities(outputs))
    }

    delegate_linear!(CurveSensitivityCalculator, ForexSmileDataBundle);

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("SwaptionCash", CURVE_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_swaption_physical(
        &self,
        _: &SwaptionPhysical,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("SwaptionPhysical", CURVE_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_forex_option_vanilla(
        &self,
        option: &ForexOptionVanilla,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        vanilla::present_value_curve_sensitivity(option, market)
    }

    fn visit_forex_option_digital(
        &self,
        option: &ForexOptionDigital,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        digital::present_value_curve_sensitivity(option, market)
    }
}

/// Vega of FX options at their `(expiry, strike)`.
///
/// Only options carry vega; results of several options combine when they
/// share currency pair and currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolatilitySensitivityBlackForexCalculator;

impl InstrumentVisitor<ForexSmileDataBundle> for VolatilitySensitivityBlackForexCalculator {
    type Output = ForexVolatilitySensitivity;

    fn calculation(&self) -> &'static str {
        VOLATILITY_SENSITIVITY_BLACK_FOREX
    }

    fn combine(
        &self,
        outputs: Vec<ForexVolatilitySensitivity>,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        let mut outputs = outputs.into_iter();
        let first = outputs
            .next()
            .ok_or_else(|| {
                PricingError::InvalidInput("no volatility sensitivity to combine".to_string())
            })?;
        outputs.try_fold(first, |acc, s| {
            acc.plus(&s).ok_or_else(|| {
                PricingError::InvalidInput(
                    "volatility sensitivities differ in currency pair or currency".to_string(),
                )
            })
        })
    }

    fn visit_cash(
        &self,
        _: &Cash,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("Cash", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_payment_fixed(
        &self,
        _: &PaymentFixed,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("PaymentFixed", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_coupon_fixed(
        &self,
        _: &CouponFixed,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("CouponFixed", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_coupon_ibor(
        &self,
        _: &CouponIbor,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("CouponIbor", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_forward_rate_agreement(
        &self,
        _: &ForwardRateAgreement,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("ForwardRateAgreement", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("SwaptionCash", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_swaption_physical(
        &self,
        _: &SwaptionPhysical,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("SwaptionPhysical", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_forex(
        &self,
        _: &Forex,
        _: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        Err(PricingError::unsupported("Forex", VOLATILITY_SENSITIVITY_BLACK_FOREX))
    }

    fn visit_forex_option_vanilla(
        &self,
        option: &ForexOptionVanilla,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        vanilla::present_value_volatility_sensitivity(option, market)
    }

    fn visit_forex_option_digital(
        &self,
        option: &ForexOptionDigital,
        market: &ForexSmileDataBundle,
    ) -> PricingResult<ForexVolatilitySensitivity> {
        digital::present_value_volatility_sensitivity(option, market)
    }
}
