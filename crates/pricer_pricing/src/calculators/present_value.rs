//! Present value calculators.

use pricer_core::types::{MultiCurrencyAmount, PricingError, PricingResult};
use pricer_models::instruments::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use pricer_models::instruments::rates::{
    Cash, CouponFixed, CouponIbor, ForwardRateAgreement, PaymentFixed, SwaptionCash,
    SwaptionPhysical,
};
use pricer_models::instruments::InstrumentVisitor;

use super::{delegate_linear, sum_amounts};
use crate::config::PricingConfig;
use crate::context::{CurveProvider, G2ppDataBundle, HullWhiteDataBundle, SabrDataBundle};
use crate::methods::discounting::{cash, coupon, fra};
use crate::methods::forex::forward;
use crate::methods::swaption::{g2pp, hull_white, sabr};

const PRESENT_VALUE: &str = "present value";
const PRESENT_VALUE_SABR: &str = "present value (SABR)";
const PRESENT_VALUE_HULL_WHITE: &str = "present value (Hull-White)";
const PRESENT_VALUE_G2PP: &str = "present value (G2++)";

/// Present value of linear instruments and FX forwards by discounting.
///
/// Works with any market data that carries curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueCalculator;

impl<M: CurveProvider + ?Sized> InstrumentVisitor<M> for PresentValueCalculator {
    type Output = MultiCurrencyAmount;

    fn calculation(&self) -> &'static str {
        PRESENT_VALUE
    }

    fn combine(&self, outputs: Vec<MultiCurrencyAmount>) -> PricingResult<MultiCurrencyAmount> {
        Ok(sum_amounts(outputs))
    }

    fn visit_cash(&self, instrument: &Cash, market: &M) -> PricingResult<MultiCurrencyAmount> {
        Ok(cash::present_value(instrument, market.curves())?.into())
    }

    fn visit_payment_fixed(
        &self,
        payment: &PaymentFixed,
        market: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(coupon::present_value_payment_fixed(payment, market.curves())?.into())
    }

    fn visit_coupon_fixed(
        &self,
        instrument: &CouponFixed,
        market: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(coupon::present_value_coupon_fixed(instrument, market.curves())?.into())
    }

    fn visit_coupon_ibor(
        &self,
        instrument: &CouponIbor,
        market: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(coupon::present_value_coupon_ibor(instrument, market.curves())?.into())
    }

    fn visit_forward_rate_agreement(
        &self,
        instrument: &ForwardRateAgreement,
        market: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(fra::present_value(instrument, market.curves())?.into())
    }

    fn visit_swaption_cash(&self, _: &SwaptionCash, _: &M) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionCash", PRESENT_VALUE))
    }

    fn visit_swaption_physical(
        &self,
        _: &SwaptionPhysical,
        _: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionPhysical", PRESENT_VALUE))
    }

    fn visit_forex(&self, instrument: &Forex, market: &M) -> PricingResult<MultiCurrencyAmount> {
        forward::present_value(instrument, market.curves())
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionVanilla", PRESENT_VALUE))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &M,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionDigital", PRESENT_VALUE))
    }
}

/// Present value of swaptions with SABR; linear instruments by discounting.
#[derive(Debug, Clone, Default)]
pub struct PresentValueSabrCalculator {
    config: PricingConfig,
}

impl PresentValueSabrCalculator {
    /// Calculator with the given extrapolation settings.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }
}

impl InstrumentVisitor<SabrDataBundle> for PresentValueSabrCalculator {
    type Output = MultiCurrencyAmount;

    fn calculation(&self) -> &'static str {
        PRESENT_VALUE_SABR
    }

    fn combine(&self, outputs: Vec<MultiCurrencyAmount>) -> PricingResult<MultiCurrencyAmount> {
        Ok(sum_amounts(outputs))
    }

    delegate_linear!(PresentValueCalculator, SabrDataBundle);

    fn visit_swaption_cash(
        &self,
        swaption: &SwaptionCash,
        market: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(sabr::present_value_cash(swaption, market, &self.config)?.into())
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(sabr::present_value_physical(swaption, market, &self.config)?.into())
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionVanilla", PRESENT_VALUE_SABR))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionDigital", PRESENT_VALUE_SABR))
    }
}

/// Numerical route of the Gaussian swaption methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwaptionRoute {
    /// Quadrature over the model factors.
    #[default]
    Integration,
    /// Closed-form approximation.
    Approximation,
}

/// Present value with Hull-White one-factor.
///
/// Physical swaptions use the explicit formula whatever the route; cash
/// swaptions follow the route.
#[derive(Debug, Clone, Default)]
pub struct PresentValueHullWhiteCalculator {
    route: SwaptionRoute,
    config: PricingConfig,
}

impl PresentValueHullWhiteCalculator {
    /// Calculator on `route` with default numerical settings.
    pub fn new(route: SwaptionRoute) -> Self {
        Self {
            route,
            config: PricingConfig::default(),
        }
    }

    /// Replaces the numerical settings.
    pub fn with_config(mut self, config: PricingConfig) -> Self {
        self.config = config;
        self
    }

    /// Route used for cash swaptions.
    pub fn route(&self) -> SwaptionRoute {
        self.route
    }
}

impl InstrumentVisitor<HullWhiteDataBundle> for PresentValueHullWhiteCalculator {
    type Output = MultiCurrencyAmount;

    fn calculation(&self) -> &'static str {
        PRESENT_VALUE_HULL_WHITE
    }

    fn combine(&self, outputs: Vec<MultiCurrencyAmount>) -> PricingResult<MultiCurrencyAmount> {
        Ok(sum_amounts(outputs))
    }

    delegate_linear!(PresentValueCalculator, HullWhiteDataBundle);

    fn visit_swaption_cash(
        &self,
        swaption: &SwaptionCash,
        market: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        let pv = match self.route {
            SwaptionRoute::Integration => {
                hull_white::present_value_cash_integration(swaption, market, &self.config)?
            }
            SwaptionRoute::Approximation => {
                hull_white::present_value_cash_approximation(swaption, market, &self.config)?
            }
        };
        Ok(pv.into())
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Ok(hull_white::present_value_physical(swaption, market, &self.config)?.into())
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionVanilla", PRESENT_VALUE_HULL_WHITE))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionDigital", PRESENT_VALUE_HULL_WHITE))
    }
}

/// Present value of physical swaptions with G2++.
#[derive(Debug, Clone, Default)]
pub struct PresentValueG2ppCalculator {
    route: SwaptionRoute,
    config: PricingConfig,
}

impl PresentValueG2ppCalculator {
    /// Calculator on `route` with default numerical settings.
    pub fn new(route: SwaptionRoute) -> Self {
        Self {
            route,
            config: PricingConfig::default(),
        }
    }

    /// Replaces the numerical settings.
    pub fn with_config(mut self, config: PricingConfig) -> Self {
        self.config = config;
        self
    }

    /// Route used for physical swaptions.
    pub fn route(&self) -> SwaptionRoute {
        self.route
    }
}

impl InstrumentVisitor<G2ppDataBundle> for PresentValueG2ppCalculator {
    type Output = MultiCurrencyAmount;

    fn calculation(&self) -> &'static str {
        PRESENT_VALUE_G2PP
    }

    fn combine(&self, outputs: Vec<MultiCurrencyAmount>) -> PricingResult<MultiCurrencyAmount> {
        Ok(sum_amounts(outputs))
    }

    delegate_linear!(PresentValueCalculator, G2ppDataBundle);

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("SwaptionCash", PRESENT_VALUE_G2PP))
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        let pv = match self.route {
            SwaptionRoute::Integration => {
                g2pp::present_value_integration(swaption, market, &self.config)?
            }
            SwaptionRoute::Approximation => {
                g2pp::present_value_approximation(swaption, market, &self.config)?
            }
        };
        Ok(pv.into())
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionVanilla", PRESENT_VALUE_G2PP))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyAmount> {
        Err(PricingError::unsupported("ForexOptionDigital", PRESENT_VALUE_G2PP))
    }
}
