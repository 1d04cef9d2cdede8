//! Calculators: one [`InstrumentVisitor`] per measure and model.
//!
//! A calculator picks the pricing method for each instrument variant and
//! returns exactly what the method returns. Model calculators send linear
//! instruments to the discounting method through the curves of their
//! bundle, so a portfolio mixing swaps and swaptions can be valued in one
//! pass.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{CurveBundle, CurveEnum};
//! use pricer_core::types::Currency;
//! use pricer_models::instruments::{rates::Swap, InstrumentDerivative};
//! use pricer_pricing::calculators::PresentValueCalculator;
//!
//! let curves = CurveBundle::new()
//!     .with_curve("USD Funding", CurveEnum::flat(0.03))
//!     .with_curve("USD Libor", CurveEnum::flat(0.035));
//! let swap = Swap::fixed_ibor(
//!     Currency::USD, 0.0, 2.0, 1, 2, 1e6, 0.035, true, "USD Funding", "USD Libor",
//! ).unwrap();
//! let pv = InstrumentDerivative::from(swap)
//!     .accept(&PresentValueCalculator, &curves)
//!     .unwrap();
//! assert!(pv.amount(Currency::USD).abs() < 1e4);
//! ```
//!
//! [`InstrumentVisitor`]: pricer_models::instruments::InstrumentVisitor

mod curve_sensitivity;
mod forex;
mod par_rate;
mod present_value;
mod pvbp;
mod sabr;

pub use curve_sensitivity::{
    CurveSensitivityCalculator, CurveSensitivityG2ppCalculator, CurveSensitivityHullWhiteCalculator,
    CurveSensitivitySabrCalculator,
};
pub use forex::{
    CurrencyExposureBlackForexCalculator, CurveSensitivityBlackForexCalculator,
    PresentValueBlackForexCalculator, VolatilitySensitivityBlackForexCalculator,
};
pub use par_rate::ParRateCalculator;
pub use present_value::{
    PresentValueCalculator, PresentValueG2ppCalculator, PresentValueHullWhiteCalculator,
    PresentValueSabrCalculator, SwaptionRoute,
};
pub use pvbp::PresentValueBasisPointCalculator;
pub use sabr::SabrSensitivityCalculator;

use pricer_core::sensitivity::MultiCurrencyCurveSensitivity;
use pricer_core::types::MultiCurrencyAmount;

/// Forwards the visits of linear instruments and FX forwards to `$base`,
/// a calculator generic over [`CurveProvider`](crate::context::CurveProvider).
macro_rules! delegate_linear {
    ($base:expr, $market:ty) => {
        fn visit_cash(
            &self,
            cash: &pricer_models::instruments::rates::Cash,
            market: &$market,
        ) -> pricer_core::types::PricingResult<Self::Output> {
            $base.visit_cash(cash, market)
        }

        fn visit_payment_fixed(
            &self,
            payment: &pricer_models::instruments::rates::PaymentFixed,
            market: &$market,
        ) -> pricer_core::types::PricingResult<Self::Output> {
            $base.visit_payment_fixed(payment, market)
        }

        fn visit_coupon_fixed(
            &self,
            coupon: &pricer_models::instruments::rates::CouponFixed,
            market: &$market,
        ) -> pricer_core::types::PricingResult<Self::Output> {
            $base.visit_coupon_fixed(coupon, market)
        }

        fn visit_coupon_ibor(
            &self,
            coupon: &pricer_models::instruments::rates::CouponIbor,
            market: &$market,
        ) -> pricer_core::types::PricingResult<Self::Output> {
            $base.visit_coupon_ibor(coupon, market)
        }

        fn visit_forward_rate_agreement(
            &self,
            fra: &pricer_models::instruments::rates::ForwardRateAgreement,
            market: &$market,
        ) -> pricer_core::types::PricingResult<Self::Output> {
            $base.visit_forward_rate_agreement(fra, market)
        }

        fn visit_forex(
            &self,
            forex: &pricer_models::instruments::fx::Forex,
            market: &$market,
        ) -> pricer_core::types::PricingResult<Self::Output> {
            $base.visit_forex(forex, market)
        }
    };
}

pub(crate) use delegate_linear;

pub(crate) fn sum_amounts(outputs: Vec<MultiCurrencyAmount>) -> MultiCurrencyAmount {
    outputs
        .iter()
        .fold(MultiCurrencyAmount::new(), |acc, amount| acc.plus_all(amount))
}

pub(crate) fn sum_sensitivities(
    outputs: Vec<MultiCurrencyCurveSensitivity>,
) -> MultiCurrencyCurveSensitivity {
    outputs
        .iter()
        .fold(MultiCurrencyCurveSensitivity::new(), |acc, s| acc.plus_all(s))
}
