//! Par rate calculator.

use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use pricer_models::instruments::rates::{
    Annuity, Cash, CouponFixed, CouponIbor, ForwardRateAgreement, PaymentFixed, Swap, SwaptionCash,
    SwaptionPhysical,
};
use pricer_models::instruments::InstrumentVisitor;

use crate::context::CurveProvider;
use crate::methods::discounting::{cash, coupon, fra, swap};

const PAR_RATE: &str = "par rate";

/// Rate that sets the present value of the instrument to zero.
///
/// Cash gives its deposit rate, an ibor coupon or FRA its forward rate and
/// a swap its forward swap rate. Par rates do not add up, so annuities and
/// fixed flows have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParRateCalculator;

impl<M: CurveProvider + ?Sized> InstrumentVisitor<M> for ParRateCalculator {
    type Output = f64;

    fn calculation(&self) -> &'static str {
        PAR_RATE
    }

    fn combine(&self, _: Vec<f64>) -> PricingResult<f64> {
        Err(PricingError::InvalidInput("par rates cannot be combined".to_string()))
    }

    fn visit_cash(&self, instrument: &Cash, market: &M) -> PricingResult<f64> {
        cash::par_rate(instrument, market.curves())
    }

    fn visit_payment_fixed(&self, _: &PaymentFixed, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("PaymentFixed", PAR_RATE))
    }

    fn visit_coupon_fixed(&self, _: &CouponFixed, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("CouponFixed", PAR_RATE))
    }

    fn visit_coupon_ibor(&self, instrument: &CouponIbor, market: &M) -> PricingResult<f64> {
        coupon::forward_rate_coupon_ibor(instrument, market.curves())
    }

    fn visit_forward_rate_agreement(
        &self,
        instrument: &ForwardRateAgreement,
        market: &M,
    ) -> PricingResult<f64> {
        fra::par_rate(instrument, market.curves())
    }

    fn visit_annuity(&self, _: &Annuity, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("Annuity", PAR_RATE))
    }

    fn visit_swap(&self, instrument: &Swap, market: &M) -> PricingResult<f64> {
        swap::forward_swap_rate(instrument, market.curves())
    }

    fn visit_swaption_cash(&self, _: &SwaptionCash, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("SwaptionCash", PAR_RATE))
    }

    fn visit_swaption_physical(&self, _: &SwaptionPhysical, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("SwaptionPhysical", PAR_RATE))
    }

    fn visit_forex(&self, _: &Forex, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("Forex", PAR_RATE))
    }

    fn visit_forex_option_vanilla(&self, _: &ForexOptionVanilla, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("ForexOptionVanilla", PAR_RATE))
    }

    fn visit_forex_option_digital(&self, _: &ForexOptionDigital, _: &M) -> PricingResult<f64> {
        Err(PricingError::unsupported("ForexOptionDigital", PAR_RATE))
    }
}
