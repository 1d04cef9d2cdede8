//! Present value of a basis point.

use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use pricer_models::instruments::rates::{
    Cash, CouponFixed, CouponIbor, ForwardRateAgreement, PaymentFixed, Swap, SwaptionCash,
    SwaptionPhysical,
};
use pricer_models::instruments::InstrumentVisitor;

use crate::context::CurveProvider;
use crate::methods::discounting::{cash, coupon, fra};

const PVBP: &str = "present value of a basis point";

/// Change in present value for a unit change of the instrument rate.
///
/// Annuities add up the PVBP of their payments. A swap reports the PVBP of
/// its first leg, the leg carrying the quoted rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValueBasisPointCalculator;

impl<M: CurveProvider + ?Sized> InstrumentVisitor<M> for PresentValueBasisPointCalculator {
    type Output = f64;

    fn calculation(&self) -> &'static str {
        PVBP
    }

    fn combine(&self, outputs: Vec<f64>) -> PricingResult<f64> {
        Ok(outputs.iter().sum())
    }

    fn visit_cash(&self, instrument: &Cash, market: &M) -> PricingResult<f64> {
        cash::present_value_basis_point(instrument, market.curves())
    }

    fn visit_payment_fixed(&self, _: &PaymentFixed, _: &M) -> PricingResult<f64> {
        Ok(0.0)
    }

    fn visit_coupon_fixed(&self, instrument: &CouponFixed, market: &M) -> PricingResult<f64> {
        coupon::present_value_basis_point_coupon_fixed(instrument, market.curves())
    }

    fn visit_coupon_ibor(&self, instrument: &CouponIbor, market: &M) -> PricingResult<f64> {
        coupon::present_value_basis_point_coupon_ibor(instrument, market.curves())
    }

    fn visit_forward_rate_agreement(
        &self,
        instrument: &ForwardRateAgreement,
        market: &M,
    ) -> PricingResult<f64> {
        fra::present_value_basis_point(instrument, market.curves())
    }

    fn visit_swap(&self, instrument: &Swap, market: &M) -> PricingResult<f64> {
        self.visit_annuity(instrument.first_leg(), market)
    }

    fn visit_swaption_cash(&self, _: &SwaptionCash, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("SwaptionCash", PVBP))
    }

    fn visit_swaption_physical(&self, _: &SwaptionPhysical, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("SwaptionPhysical", PVBP))
    }

    fn visit_forex(&self, _: &Forex, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("Forex", PVBP))
    }

    fn visit_forex_option_vanilla(&self, _: &ForexOptionVanilla, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("ForexOptionVanilla", PVBP))
    }

    fn visit_forex_option_digital(&self, _: &ForexOptionDigital, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("ForexOptionDigital", PVBP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::swap;
    use crate::methods::discounting::test_support::{curves, FORWARD, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::market_data::YieldCurve;
    use pricer_core::types::Currency;
    use pricer_models::instruments::InstrumentDerivative;

    fn underlying() -> Swap {
        Swap::fixed_ibor(Currency::USD, 1.0, 5.0, 1, 4, 1e8, 0.03, true, FUNDING, FORWARD).unwrap()
    }

    #[test]
    fn test_swap_pvbp_is_first_leg_only() {
        let curves = curves();
        let s = underlying();
        let pvbp = InstrumentDerivative::from(s.clone())
            .accept(&PresentValueBasisPointCalculator, &curves)
            .unwrap();
        let leg = swap::present_value_basis_point_annuity(s.first_leg(), &curves).unwrap();
        assert_relative_eq!(pvbp, leg, max_relative = 1e-12);
        let second = swap::present_value_basis_point_annuity(s.second_leg(), &curves).unwrap();
        assert!((pvbp - (leg + second)).abs() > 1.0);
    }

    #[test]
    fn test_fixed_payment_has_zero_pvbp() {
        let payment = PaymentFixed::new(Currency::USD, 2.0, 1e6, FUNDING).unwrap();
        let pvbp = InstrumentDerivative::from(payment)
            .accept(&PresentValueBasisPointCalculator, &curves())
            .unwrap();
        assert_eq!(pvbp, 0.0);
    }

    #[test]
    fn test_cash_pvbp_is_discounted_accrual() {
        let curves = curves();
        let deposit = Cash::new(Currency::USD, 0.0, 0.5, 0.5, 1e6, 0.03, FUNDING).unwrap();
        let pvbp = InstrumentDerivative::from(deposit.clone())
            .accept(&PresentValueBasisPointCalculator, &curves)
            .unwrap();
        let df = curves.get_curve(FUNDING).unwrap().discount_factor(0.5).unwrap();
        assert_relative_eq!(pvbp, df * 0.5 * 1e6, max_relative = 1e-12);
    }

    #[test]
    fn test_swaption_is_unsupported() {
        let swaption = SwaptionPhysical::new(underlying(), 0.9, true).unwrap();
        let err = InstrumentDerivative::from(swaption)
            .accept(&PresentValueBasisPointCalculator, &curves())
            .unwrap_err();
        assert_eq!(err, PricingError::unsupported("SwaptionPhysical", PVBP));
    }
}
