//! Curve sensitivity calculators.

use pricer_core::sensitivity::{CurveSensitivity, MultiCurrencyCurveSensitivity};
use pricer_core::types::{Currency, PricingError, PricingResult};
use pricer_models::instruments::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use pricer_models::instruments::rates::{
    Cash, CouponFixed, CouponIbor, ForwardRateAgreement, PaymentFixed, SwaptionCash,
    SwaptionPhysical,
};
use pricer_models::instruments::InstrumentVisitor;

use super::{delegate_linear, sum_sensitivities, SwaptionRoute};
use crate::config::PricingConfig;
use crate::context::{CurveProvider, G2ppDataBundle, HullWhiteDataBundle, SabrDataBundle};
use crate::methods::discounting::{cash, coupon, fra};
use crate::methods::forex::forward;
use crate::methods::swaption::{g2pp, hull_white, sabr};

const CURVE_SENSITIVITY: &str = "curve sensitivity";
const CURVE_SENSITIVITY_SABR: &str = "curve sensitivity (SABR)";
const CURVE_SENSITIVITY_HULL_WHITE: &str = "curve sensitivity (Hull-White)";
const CURVE_SENSITIVITY_G2PP: &str = "curve sensitivity (G2++)";

fn in_currency(currency: Currency, sensitivity: CurveSensitivity) -> MultiCurrencyCurveSensitivity {
    MultiCurrencyCurveSensitivity::of(currency, sensitivity)
}

/// Curve sensitivity of linear instruments and FX forwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurveSensitivityCalculator;

impl<M: CurveProvider + ?Sized> InstrumentVisitor<M> for CurveSensitivityCalculator {
    type Output = MultiCurrencyCurveSensitivity;

    fn calculation(&self) -> &'static str {
        CURVE_SENSITIVITY
    }

    fn combine(
        &self,
        outputs: Vec<MultiCurrencyCurveSensitivity>,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Ok(sum_sensitivities(outputs))
    }

    fn visit_cash(
        &self,
        instrument: &Cash,
        market: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = cash::present_value_curve_sensitivity(instrument, market.curves())?;
        Ok(in_currency(instrument.currency(), s))
    }

    fn visit_payment_fixed(
        &self,
        payment: &PaymentFixed,
        market: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = coupon::present_value_curve_sensitivity_payment_fixed(payment, market.curves())?;
        Ok(in_currency(payment.currency(), s))
    }

    fn visit_coupon_fixed(
        &self,
        instrument: &CouponFixed,
        market: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = coupon::present_value_curve_sensitivity_coupon_fixed(instrument, market.curves())?;
        Ok(in_currency(instrument.currency(), s))
    }

    fn visit_coupon_ibor(
        &self,
        instrument: &CouponIbor,
        market: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = coupon::present_value_curve_sensitivity_coupon_ibor(instrument, market.curves())?;
        Ok(in_currency(instrument.currency(), s))
    }

    fn visit_forward_rate_agreement(
        &self,
        instrument: &ForwardRateAgreement,
        market: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = fra::present_value_curve_sensitivity(instrument, market.curves())?;
        Ok(in_currency(instrument.currency(), s))
    }

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("SwaptionCash", CURVE_SENSITIVITY))
    }

    fn visit_swaption_physical(
        &self,
        _: &SwaptionPhysical,
        _: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("SwaptionPhysical", CURVE_SENSITIVITY))
    }

    fn visit_forex(
        &self,
        instrument: &Forex,
        market: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        forward::present_value_curve_sensitivity(instrument, market.curves())
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionVanilla", CURVE_SENSITIVITY))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &M,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionDigital", CURVE_SENSITIVITY))
    }
}

/// Curve sensitivity of swaptions with SABR.
#[derive(Debug, Clone, Default)]
pub struct CurveSensitivitySabrCalculator {
    config: PricingConfig,
}

impl CurveSensitivitySabrCalculator {
    /// Calculator with the given extrapolation settings.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }
}

impl InstrumentVisitor<SabrDataBundle> for CurveSensitivitySabrCalculator {
    type Output = MultiCurrencyCurveSensitivity;

    fn calculation(&self) -> &'static str {
        CURVE_SENSITIVITY_SABR
    }

    fn combine(
        &self,
        outputs: Vec<MultiCurrencyCurveSensitivity>,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Ok(sum_sensitivities(outputs))
    }

    delegate_linear!(CurveSensitivityCalculator, SabrDataBundle);

    fn visit_swaption_cash(
        &self,
        swaption: &SwaptionCash,
        market: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = sabr::present_value_curve_sensitivity_cash(swaption, market, &self.config)?;
        Ok(in_currency(swaption.currency(), s))
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = sabr::present_value_curve_sensitivity_physical(swaption, market, &self.config)?;
        Ok(in_currency(swaption.currency(), s))
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionVanilla", CURVE_SENSITIVITY_SABR))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &SabrDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionDigital", CURVE_SENSITIVITY_SABR))
    }
}

/// Curve sensitivity of swaptions with Hull-White one-factor.
///
/// Cash swaptions are differentiated through the integrated value.
#[derive(Debug, Clone, Default)]
pub struct CurveSensitivityHullWhiteCalculator {
    config: PricingConfig,
}

impl CurveSensitivityHullWhiteCalculator {
    /// Calculator with the given numerical settings.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }
}

impl InstrumentVisitor<HullWhiteDataBundle> for CurveSensitivityHullWhiteCalculator {
    type Output = MultiCurrencyCurveSensitivity;

    fn calculation(&self) -> &'static str {
        CURVE_SENSITIVITY_HULL_WHITE
    }

    fn combine(
        &self,
        outputs: Vec<MultiCurrencyCurveSensitivity>,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Ok(sum_sensitivities(outputs))
    }

    delegate_linear!(CurveSensitivityCalculator, HullWhiteDataBundle);

    fn visit_swaption_cash(
        &self,
        swaption: &SwaptionCash,
        market: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = hull_white::present_value_curve_sensitivity_cash(swaption, market, &self.config)?;
        Ok(in_currency(swaption.currency(), s))
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s =
            hull_white::present_value_curve_sensitivity_physical(swaption, market, &self.config)?;
        Ok(in_currency(swaption.currency(), s))
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionVanilla", CURVE_SENSITIVITY_HULL_WHITE))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &HullWhiteDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionDigital", CURVE_SENSITIVITY_HULL_WHITE))
    }
}

/// Curve sensitivity of physical swaptions with G2++.
#[derive(Debug, Clone, Default)]
pub struct CurveSensitivityG2ppCalculator {
    route: SwaptionRoute,
    config: PricingConfig,
}

impl CurveSensitivityG2ppCalculator {
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

impl InstrumentVisitor<G2ppDataBundle> for CurveSensitivityG2ppCalculator {
    type Output = MultiCurrencyCurveSensitivity;

    fn calculation(&self) -> &'static str {
        CURVE_SENSITIVITY_G2PP
    }

    fn combine(
        &self,
        outputs: Vec<MultiCurrencyCurveSensitivity>,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Ok(sum_sensitivities(outputs))
    }

    delegate_linear!(CurveSensitivityCalculator, G2ppDataBundle);

    fn visit_swaption_cash(
        &self,
        _: &SwaptionCash,
        _: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("SwaptionCash", CURVE_SENSITIVITY_G2PP))
    }

    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        let s = match self.route {
            SwaptionRoute::Integration => {
                g2pp::present_value_curve_sensitivity_integration(swaption, market, &self.config)?
            }
            SwaptionRoute::Approximation => {
                g2pp::present_value_curve_sensitivity_approximation(swaption, market, &self.config)?
            }
        };
        Ok(in_currency(swaption.currency(), s))
    }

    fn visit_forex_option_vanilla(
        &self,
        _: &ForexOptionVanilla,
        _: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionVanilla", CURVE_SENSITIVITY_G2PP))
    }

    fn visit_forex_option_digital(
        &self,
        _: &ForexOptionDigital,
        _: &G2ppDataBundle,
    ) -> PricingResult<MultiCurrencyCurveSensitivity> {
        Err(PricingError::unsupported("ForexOptionDigital", CURVE_SENSITIVITY_G2PP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::swap;
    use crate::calculators::{PresentValueG2ppCalculator, PresentValueHullWhiteCalculator};
    use crate::methods::discounting::test_support::{assert_nodes_match, curves, FORWARD, FUNDING};
    use pricer_models::instruments::rates::Swap;
    use pricer_models::instruments::InstrumentDerivative;
    use pricer_models::models::{G2ppParameters, HullWhiteParameters};

    fn underlying() -> Swap {
        Swap::fixed_ibor(Currency::USD, 1.0, 4.0, 1, 4, 1e7, 0.04, false, FUNDING, FORWARD).unwrap()
    }

    #[test]
    fn test_swap_sensitivity_equals_method() {
        let curves = curves();
        let s = underlying();
        let calculated = InstrumentDerivative::from(s.clone())
            .accept(&CurveSensitivityCalculator, &curves)
            .unwrap();
        let direct = swap::present_value_curve_sensitivity(&s, &curves).unwrap();
        assert!(calculated.sensitivity(Currency::USD).approx_eq(&direct, 1e-8));
        assert_eq!(calculated.currencies().count(), 1);
    }

    #[test]
    fn test_hull_white_physical_equals_method() {
        let bundle =
            HullWhiteDataBundle::new(curves(), HullWhiteParameters::constant(0.02, 0.009).unwrap());
        let swaption = SwaptionPhysical::new(underlying(), 0.95, false).unwrap();
        let calculated = InstrumentDerivative::from(swaption.clone())
            .accept(&CurveSensitivityHullWhiteCalculator::default(), &bundle)
            .unwrap();
        let config = PricingConfig::default();
        let direct =
            hull_white::present_value_curve_sensitivity_physical(&swaption, &bundle, &config)
                .unwrap();
        assert_eq!(calculated, MultiCurrencyCurveSensitivity::of(Currency::USD, direct));
    }

    #[test]
    fn test_hull_white_cash_against_node_bumps() {
        let bundle =
            HullWhiteDataBundle::new(curves(), HullWhiteParameters::constant(0.02, 0.009).unwrap());
        let calculator = CurveSensitivityHullWhiteCalculator::default();
        let pv_calculator = PresentValueHullWhiteCalculator::default();
        for strike in [0.03, 0.045] {
            let swap = Swap::fixed_ibor(
                Currency::USD,
                1.0,
                4.0,
                1,
                4,
                1e7,
                strike,
                false,
                FUNDING,
                FORWARD,
            )
            .unwrap();
            let swaption =
                InstrumentDerivative::from(SwaptionCash::new(swap, 0.95, 1.0, true).unwrap());
            let calculated = swaption.accept(&calculator, &bundle).unwrap();
            let sensitivity = calculated.sensitivity(Currency::USD);
            assert_nodes_match(&sensitivity, bundle.curves(), &[FUNDING, FORWARD], 1e-6 * 1e7, |c| {
                swaption
                    .accept(&pv_calculator, &bundle.with_curves(c.clone()))
                    .unwrap()
                    .amount(Currency::USD)
            });
        }
    }

    #[test]
    fn test_g2pp_physical_routes_against_node_bumps() {
        let parameters =
            G2ppParameters::new([0.02, 0.3], [vec![0.009], vec![0.006]], vec![], -0.4).unwrap();
        let bundle = G2ppDataBundle::new(curves(), parameters);
        let swaption =
            InstrumentDerivative::from(SwaptionPhysical::new(underlying(), 0.95, true).unwrap());
        for route in [SwaptionRoute::Integration, SwaptionRoute::Approximation] {
            let calculated = swaption
                .accept(&CurveSensitivityG2ppCalculator::new(route), &bundle)
                .unwrap();
            let pv_calculator = PresentValueG2ppCalculator::new(route);
            assert_nodes_match(
                &calculated.sensitivity(Currency::USD),
                bundle.curves(),
                &[FUNDING, FORWARD],
                1e-6 * 1e7,
                |c| {
                    swaption
                        .accept(&pv_calculator, &bundle.with_curves(c.clone()))
                        .unwrap()
                        .amount(Currency::USD)
                },
            );
        }
    }

    #[test]
    fn test_g2pp_cash_is_unsupported() {
        let parameters =
            G2ppParameters::new([0.02, 0.3], [vec![0.009], vec![0.006]], vec![], -0.4).unwrap();
        let bundle = G2ppDataBundle::new(curves(), parameters);
        let swaption = SwaptionCash::new(underlying(), 0.95, 1.0, true).unwrap();
        let err = InstrumentDerivative::from(swaption)
            .accept(&CurveSensitivityG2ppCalculator::default(), &bundle)
            .unwrap_err();
        assert_eq!(err, PricingError::unsupported("SwaptionCash", "curve sensitivity (G2++)"));
    }
}
