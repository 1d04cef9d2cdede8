//! Instrument derivative definitions.
//!
//! Instruments are immutable descriptions of cash flows with every date
//! already converted to a year fraction from the valuation date. Each
//! variant names the curves it needs; market data is only bound at
//! pricing time.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects):
//! - [`InstrumentDerivative`] closes the set of variants
//! - [`InstrumentDerivative::accept`] is an exhaustive `match`, so a new
//!   variant does not compile until [`InstrumentVisitor`] has a method for it
//!
//! # Asset Class Modules
//!
//! - [`rates`]: payments, coupons, FRAs, annuities, swaps, swaptions
//! - [`fx`]: FX forwards and options
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{InstrumentDerivative, rates::Swap};
//! use pricer_core::types::Currency;
//!
//! let swap = Swap::fixed_ibor(
//!     Currency::USD, 0.0, 2.0, 1, 4, 1e6, 0.02, true, "USD Funding", "USD Libor",
//! ).unwrap();
//! let instrument = InstrumentDerivative::from(swap);
//! assert_eq!(instrument.kind(), "Swap");
//! assert_eq!(instrument.currency(), Currency::USD);
//! ```

mod error;
#[cfg(feature = "serde")]
mod raw;
mod visitor;

pub mod fx;
pub mod rates;

pub use error::InstrumentError;
pub use visitor::InstrumentVisitor;

use pricer_core::types::{Currency, PricingResult};

use fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use rates::{
    Annuity, Cash, CouponFixed, CouponIbor, ForwardRateAgreement, Payment, PaymentFixed, Swap,
    SwaptionCash, SwaptionPhysical,
};

/// Closed set of instrument derivatives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstrumentDerivative {
    /// Deposit
    Cash(Cash),
    /// Known amount
    PaymentFixed(PaymentFixed),
    /// Fixed-rate coupon
    CouponFixed(CouponFixed),
    /// Floating coupon
    CouponIbor(CouponIbor),
    /// Forward rate agreement
    ForwardRateAgreement(ForwardRateAgreement),
    /// Sequence of payments
    Annuity(Annuity),
    /// Two annuity legs
    Swap(Swap),
    /// Cash-settled swaption
    SwaptionCash(SwaptionCash),
    /// Physical-delivery swaption
    SwaptionPhysical(SwaptionPhysical),
    /// FX forward
    Forex(Forex),
    /// Vanilla FX option
    ForexOptionVanilla(ForexOptionVanilla),
    /// Digital FX option
    ForexOptionDigital(ForexOptionDigital),
}

impl InstrumentDerivative {
    /// Runs `visitor` on this instrument with `market`.
    pub fn accept<M, V>(&self, visitor: &V, market: &M) -> PricingResult<V::Output>
    where
        M: ?Sized,
        V: InstrumentVisitor<M> + ?Sized,
    {
        match self {
            InstrumentDerivative::Cash(i) => visitor.visit_cash(i, market),
            InstrumentDerivative::PaymentFixed(i) => visitor.visit_payment_fixed(i, market),
            InstrumentDerivative::CouponFixed(i) => visitor.visit_coupon_fixed(i, market),
            InstrumentDerivative::CouponIbor(i) => visitor.visit_coupon_ibor(i, market),
            InstrumentDerivative::ForwardRateAgreement(i) => {
                visitor.visit_forward_rate_agreement(i, market)
            }
            InstrumentDerivative::Annuity(i) => visitor.visit_annuity(i, market),
            InstrumentDerivative::Swap(i) => visitor.visit_swap(i, market),
            InstrumentDerivative::SwaptionCash(i) => visitor.visit_swaption_cash(i, market),
            InstrumentDerivative::SwaptionPhysical(i) => visitor.visit_swaption_physical(i, market),
            InstrumentDerivative::Forex(i) => visitor.visit_forex(i, market),
            InstrumentDerivative::ForexOptionVanilla(i) => {
                visitor.visit_forex_option_vanilla(i, market)
            }
            InstrumentDerivative::ForexOptionDigital(i) => {
                visitor.visit_forex_option_digital(i, market)
            }
        }
    }

    /// Variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            InstrumentDerivative::Cash(_) => "Cash",
            InstrumentDerivative::PaymentFixed(_) => "PaymentFixed",
            InstrumentDerivative::CouponFixed(_) => "CouponFixed",
            InstrumentDerivative::CouponIbor(_) => "CouponIbor",
            InstrumentDerivative::ForwardRateAgreement(_) => "ForwardRateAgreement",
            InstrumentDerivative::Annuity(_) => "Annuity",
            InstrumentDerivative::Swap(_) => "Swap",
            InstrumentDerivative::SwaptionCash(_) => "SwaptionCash",
            InstrumentDerivative::SwaptionPhysical(_) => "SwaptionPhysical",
            InstrumentDerivative::Forex(_) => "Forex",
            InstrumentDerivative::ForexOptionVanilla(_) => "ForexOptionVanilla",
            InstrumentDerivative::ForexOptionDigital(_) => "ForexOptionDigital",
        }
    }

    /// Currency of the instrument; the domestic currency for FX products.
    pub fn currency(&self) -> Currency {
        match self {
            InstrumentDerivative::Cash(i) => i.currency(),
            InstrumentDerivative::PaymentFixed(i) => i.currency(),
            InstrumentDerivative::CouponFixed(i) => i.currency(),
            InstrumentDerivative::CouponIbor(i) => i.currency(),
            InstrumentDerivative::ForwardRateAgreement(i) => i.currency(),
            InstrumentDerivative::Annuity(i) => i.currency(),
            InstrumentDerivative::Swap(i) => i.currency(),
            InstrumentDerivative::SwaptionCash(i) => i.currency(),
            InstrumentDerivative::SwaptionPhysical(i) => i.currency(),
            InstrumentDerivative::Forex(i) => i.currency2(),
            InstrumentDerivative::ForexOptionVanilla(i) => i.currency(),
            InstrumentDerivative::ForexOptionDigital(i) => i.underlying().currency2(),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for InstrumentDerivative {
                fn from(instrument: $variant) -> Self {
                    InstrumentDerivative::$variant(instrument)
                }
            }
        )*
    };
}

impl_from_variant!(
    Cash,
    PaymentFixed,
    CouponFixed,
    CouponIbor,
    ForwardRateAgreement,
    Annuity,
    Swap,
    SwaptionCash,
    SwaptionPhysical,
    Forex,
    ForexOptionVanilla,
    ForexOptionDigital,
);

impl From<Payment> for InstrumentDerivative {
    fn from(payment: Payment) -> Self {
        match payment {
            Payment::Fixed(p) => InstrumentDerivative::PaymentFixed(p),
            Payment::CouponFixed(c) => InstrumentDerivative::CouponFixed(c),
            Payment::CouponIbor(c) => InstrumentDerivative::CouponIbor(c),
            Payment::ForwardRateAgreement(f) => InstrumentDerivative::ForwardRateAgreement(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::PricingError;

    const LEAF_COUNT: &str = "leaf count";

    /// Counts leaf payments; rejects options.
    struct LeafCounter;

    impl InstrumentVisitor<()> for LeafCounter {
        type Output = usize;

        fn calculation(&self) -> &'static str {
            LEAF_COUNT
        }

        fn combine(&self, outputs: Vec<usize>) -> PricingResult<usize> {
            Ok(outputs.into_iter().sum())
        }

        fn visit_cash(&self, _: &Cash, _: &()) -> PricingResult<usize> {
            Ok(1)
        }

        fn visit_payment_fixed(&self, _: &PaymentFixed, _: &()) -> PricingResult<usize> {
            Ok(1)
        }

        fn visit_coupon_fixed(&self, _: &CouponFixed, _: &()) -> PricingResult<usize> {
            Ok(1)
        }

        fn visit_coupon_ibor(&self, _: &CouponIbor, _: &()) -> PricingResult<usize> {
            Ok(1)
        }

        fn visit_forward_rate_agreement(
            &self,
            _: &ForwardRateAgreement,
            _: &(),
        ) -> PricingResult<usize> {
            Ok(1)
        }

        fn visit_swaption_cash(&self, _: &SwaptionCash, _: &()) -> PricingResult<usize> {
            Err(PricingError::unsupported("SwaptionCash", LEAF_COUNT))
        }

        fn visit_swaption_physical(&self, _: &SwaptionPhysical, _: &()) -> PricingResult<usize> {
            Err(PricingError::unsupported("SwaptionPhysical", LEAF_COUNT))
        }

        fn visit_forex(&self, _: &Forex, _: &()) -> PricingResult<usize> {
            Ok(2)
        }

        fn visit_forex_option_vanilla(
            &self,
            _: &ForexOptionVanilla,
            _: &(),
        ) -> PricingResult<usize> {
            Err(PricingError::unsupported("ForexOptionVanilla", LEAF_COUNT))
        }

        fn visit_forex_option_digital(
            &self,
            _: &ForexOptionDigital,
            _: &(),
        ) -> PricingResult<usize> {
            Err(PricingError::unsupported("ForexOptionDigital", LEAF_COUNT))
        }
    }

    fn swap() -> Swap {
        Swap::fixed_ibor(Currency::EUR, 1.0, 2.0, 1, 2, 1.0, 0.01, false, "F", "L").unwrap()
    }

    #[test]
    fn test_swap_routes_through_both_legs() {
        let instrument = InstrumentDerivative::from(swap());
        assert_eq!(instrument.accept(&LeafCounter, &()).unwrap(), 6);
    }

    #[test]
    fn test_unsupported_names_variant_and_calculation() {
        let swaption = SwaptionPhysical::new(swap(), 1.0, true).unwrap();
        let err = InstrumentDerivative::from(swaption).accept(&LeafCounter, &()).unwrap_err();
        assert_eq!(err, PricingError::unsupported("SwaptionPhysical", "leaf count"));
    }

    #[test]
    fn test_payment_conversion_keeps_variant() {
        let cpn = CouponFixed::new(Currency::EUR, 1.0, 1.0, 1.0, 0.02, "F").unwrap();
        let instrument = InstrumentDerivative::from(Payment::from(cpn));
        assert_eq!(instrument.kind(), "CouponFixed");
        assert_eq!(instrument.accept(&LeafCounter, &()).unwrap(), 1);
    }
}
