//! Double dispatch over instrument variants.
//!
//! A calculation implements [`InstrumentVisitor`] for the market data it
//! needs. [`InstrumentDerivative::accept`](super::InstrumentDerivative::accept)
//! selects the visit method from the variant; the visitor selects the
//! pricing method from the calculation. Variants a calculation cannot
//! price return [`PricingError::UnsupportedInstrument`] naming the variant
//! and [`InstrumentVisitor::calculation`].
//!
//! Composite instruments have default routing: an annuity visits each of
//! its payments, a swap visits both legs, and the results are merged with
//! [`InstrumentVisitor::combine`]. Visitors override these when the
//! calculation is not additive over components.
//!
//! [`PricingError::UnsupportedInstrument`]: pricer_core::types::PricingError::UnsupportedInstrument

use pricer_core::types::PricingResult;

use super::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use super::rates::{
    Annuity, Cash, CouponFixed, CouponIbor, ForwardRateAgreement, Payment, PaymentFixed, Swap,
    SwaptionCash, SwaptionPhysical,
};

/// A calculation over instrument derivatives with market data `M`.
pub trait InstrumentVisitor<M: ?Sized> {
    /// Calculation result.
    type Output;

    /// Calculation name used in error messages.
    fn calculation(&self) -> &'static str;

    /// Merges the results of the components of a composite instrument.
    fn combine(&self, outputs: Vec<Self::Output>) -> PricingResult<Self::Output>;

    /// Deposit.
    fn visit_cash(&self, cash: &Cash, market: &M) -> PricingResult<Self::Output>;

    /// Fixed payment.
    fn visit_payment_fixed(&self, payment: &PaymentFixed, market: &M)
        -> PricingResult<Self::Output>;

    /// Fixed coupon.
    fn visit_coupon_fixed(&self, coupon: &CouponFixed, market: &M) -> PricingResult<Self::Output>;

    /// Ibor coupon.
    fn visit_coupon_ibor(&self, coupon: &CouponIbor, market: &M) -> PricingResult<Self::Output>;

    /// Forward rate agreement.
    fn visit_forward_rate_agreement(
        &self,
        fra: &ForwardRateAgreement,
        market: &M,
    ) -> PricingResult<Self::Output>;

    /// Cash-settled swaption.
    fn visit_swaption_cash(
        &self,
        swaption: &SwaptionCash,
        market: &M,
    ) -> PricingResult<Self::Output>;

    /// Physical-delivery swaption.
    fn visit_swaption_physical(
        &self,
        swaption: &SwaptionPhysical,
        market: &M,
    ) -> PricingResult<Self::Output>;

    /// FX forward.
    fn visit_forex(&self, forex: &Forex, market: &M) -> PricingResult<Self::Output>;

    /// Vanilla FX option.
    fn visit_forex_option_vanilla(
        &self,
        option: &ForexOptionVanilla,
        market: &M,
    ) -> PricingResult<Self::Output>;

    /// Digital FX option.
    fn visit_forex_option_digital(
        &self,
        option: &ForexOptionDigital,
        market: &M,
    ) -> PricingResult<Self::Output>;

    /// Routes a payment to its variant method.
    fn visit_payment(&self, payment: &Payment, market: &M) -> PricingResult<Self::Output> {
        match payment {
            Payment::Fixed(p) => self.visit_payment_fixed(p, market),
            Payment::CouponFixed(c) => self.visit_coupon_fixed(c, market),
            Payment::CouponIbor(c) => self.visit_coupon_ibor(c, market),
            Payment::ForwardRateAgreement(f) => self.visit_forward_rate_agreement(f, market),
        }
    }

    /// Visits every payment and combines the results.
    fn visit_annuity(&self, annuity: &Annuity, market: &M) -> PricingResult<Self::Output> {
        let outputs = annuity
            .payments()
            .iter()
            .map(|p| self.visit_payment(p, market))
            .collect::<PricingResult<Vec<_>>>()?;
        self.combine(outputs)
    }

    /// Visits both legs and combines the results.
    fn visit_swap(&self, swap: &Swap, market: &M) -> PricingResult<Self::Output> {
        let first = self.visit_annuity(swap.first_leg(), market)?;
        let second = self.visit_annuity(swap.second_leg(), market)?;
        self.combine(vec![first, second])
    }
}
