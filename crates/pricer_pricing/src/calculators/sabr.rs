//! SABR parameter sensitivity calculator.

use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use pricer_models::instruments::rates::{
    Cash, CouponFixed, CouponIbor, ForwardRateAgreement, PaymentFixed, SwaptionCash,
    SwaptionPhysical,
};
use pricer_models::instruments::InstrumentVisitor;

use crate::config::PricingConfig;
use crate::context::SabrDataBundle;
use crate::methods::swaption::{sabr, SabrSensitivity};

const SABR_SENSITIVITY: &str = "SABR sensitivity";

/// Sensitivity of the present value to α, ρ and ν.
///
/// Linear rate instruments do not depend on the SABR surface and report an
/// empty sensitivity, so mixed portfolios can be aggregated.
#[derive(Debug, Clone, Default)]
pub struct SabrSensitivityCalculator {
    config: PricingConfig,
}

impl SabrSensitivityCalculator {
    /// Calculator with the given extrapolation settings.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }
}

impl InstrumentVisitor<SabrDataBundle> for SabrSensitivityCalculator {
    type Output = SabrSensitivity;

    fn calculation(&self) -> &'static str {
        SABR_SENSITIVITY
    }

    fn combine(&self, outputs: Vec<SabrSensitivity>) -> PricingResult<SabrSensitivity> {
        Ok(outputs
            .iter()
            .fold(SabrSensitivity::new(), |acc, s| acc.plus(s)))
    }

    fn visit_cash(&self, _: &Cash, _: &SabrDataBundle) -> PricingResult<SabrSensitivity> {
        Ok(SabrSensitivity::new())
    }

    fn visit_payment_fixed(
        &self,
        _: &PaymentFixed,
        _: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        Ok(SabrSensitivity::new())
    }

    fn visit_coupon_fixed(
        &self,
        _: &CouponFixed,
        _: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        Ok(SabrSensitivity::new())
    }

    fn visit_coupon_ibor(
        &self,
        _: &CouponIbor,
        _: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        Ok(SabrSensitivity::new())
    }

    fn visit_forward_rate_agreement(
        &self,
        _: &ForwardRateAgreement,
        _: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        Ok(SabrSensitivity::new())
    }

    fn visit_swaption_cash(
        &self,
        swaption: &SwaptionCash,
        market: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        sabr::present_value_sabr_sensitivity_cash(swaption, market, &self.config)
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        sabr::present_value_sabr_sensitivity_physical(swaption, market, &self.config)
    }

    fn visit_forex(&self, _: &Forex, _: &SabrDataBundle) -> PricingResult<SabrSensitivity> {
        Err(PricingError::unsupported("Forex", SABR_SENSITIVITY))
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        Err(PricingError::unsupported("ForexOptionVanilla", SABR_SENSITIVITY))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &SabrDataBundle,
    ) -> PricingResult<SabrSensitivity> {
        Err(PricingError::unsupported("ForexOptionDigital", SABR_SENSITIVITY))
    }
}
