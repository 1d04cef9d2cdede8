//! Deserialization shapes of the instruments.
//!
//! Every instrument deserializes into one of these field-for-field copies
//! and is then rebuilt through its constructor, so decoded instruments
//! pass the same validation as constructed ones.

use pricer_core::types::Currency;
use serde::Deserialize;

use super::error::InstrumentError;
use super::fx::{Forex, ForexOptionDigital, ForexOptionVanilla};
use super::rates::{
    Annuity, Cash, CouponFixed, CouponIbor, ForwardRateAgreement, Payment, PaymentFixed, Swap,
    SwaptionCash, SwaptionPhysical,
};

#[derive(Deserialize)]
pub struct CashRaw {
    currency: Currency,
    start_time: f64,
    end_time: f64,
    accrual_factor: f64,
    notional: f64,
    rate: f64,
    funding_curve: String,
}

impl TryFrom<CashRaw> for Cash {
    type Error = InstrumentError;

    fn try_from(raw: CashRaw) -> Result<Self, Self::Error> {
        Cash::new(
            raw.currency,
            raw.start_time,
            raw.end_time,
            raw.accrual_factor,
            raw.notional,
            raw.rate,
            raw.funding_curve,
        )
    }
}

#[derive(Deserialize)]
pub struct PaymentFixedRaw {
    currency: Currency,
    payment_time: f64,
    amount: f64,
    funding_curve: String,
}

impl TryFrom<PaymentFixedRaw> for PaymentFixed {
    type Error = InstrumentError;

    fn try_from(raw: PaymentFixedRaw) -> Result<Self, Self::Error> {
        PaymentFixed::new(raw.currency, raw.payment_time, raw.amount, raw.funding_curve)
    }
}

#[derive(Deserialize)]
pub struct CouponFixedRaw {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixed_rate: f64,
    funding_curve: String,
}

impl TryFrom<CouponFixedRaw> for CouponFixed {
    type Error = InstrumentError;

    fn try_from(raw: CouponFixedRaw) -> Result<Self, Self::Error> {
        CouponFixed::new(
            raw.currency,
            raw.payment_time,
            raw.payment_year_fraction,
            raw.notional,
            raw.fixed_rate,
            raw.funding_curve,
        )
    }
}

#[derive(Deserialize)]
pub struct CouponIborRaw {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixing_time: f64,
    fixing_period_start_time: f64,
    fixing_period_end_time: f64,
    fixing_year_fraction: f64,
    #[serde(default)]
    spread: f64,
    funding_curve: String,
    forward_curve: String,
}

impl TryFrom<CouponIborRaw> for CouponIbor {
    type Error = InstrumentError;

    fn try_from(raw: CouponIborRaw) -> Result<Self, Self::Error> {
        CouponIbor::new(
            raw.currency,
            raw.payment_time,
            raw.payment_year_fraction,
            raw.notional,
            raw.fixing_time,
            raw.fixing_period_start_time,
            raw.fixing_period_end_time,
            raw.fixing_year_fraction,
            raw.spread,
            raw.funding_curve,
            raw.forward_curve,
        )
    }
}

#[derive(Deserialize)]
pub struct ForwardRateAgreementRaw {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixing_time: f64,
    fixing_period_start_time: f64,
    fixing_period_end_time: f64,
    fixing_year_fraction: f64,
    fixed_rate: f64,
    funding_curve: String,
    forward_curve: String,
}

impl TryFrom<ForwardRateAgreementRaw> for ForwardRateAgreement {
    type Error = InstrumentError;

    fn try_from(raw: ForwardRateAgreementRaw) -> Result<Self, Self::Error> {
        ForwardRateAgreement::new(
            raw.currency,
            raw.payment_time,
            raw.payment_year_fraction,
            raw.notional,
            raw.fixing_time,
            raw.fixing_period_start_time,
            raw.fixing_period_end_time,
            raw.fixing_year_fraction,
            raw.fixed_rate,
            raw.funding_curve,
            raw.forward_curve,
        )
    }
}

#[derive(Deserialize)]
pub struct AnnuityRaw {
    payments: Vec<Payment>,
}

impl TryFrom<AnnuityRaw> for Annuity {
    type Error = InstrumentError;

    fn try_from(raw: AnnuityRaw) -> Result<Self, Self::Error> {
        Annuity::new(raw.payments)
    }
}

#[derive(Deserialize)]
pub struct SwapRaw {
    first_leg: Annuity,
    second_leg: Annuity,
}

impl TryFrom<SwapRaw> for Swap {
    type Error = InstrumentError;

    fn try_from(raw: SwapRaw) -> Result<Self, Self::Error> {
        Swap::new(raw.first_leg, raw.second_leg)
    }
}

// The strike is derived from the underlying; a serialized copy is ignored.
#[derive(Deserialize)]
pub struct SwaptionCashRaw {
    underlying: Swap,
    expiry_time: f64,
    settlement_time: f64,
    is_long: bool,
}

impl TryFrom<SwaptionCashRaw> for SwaptionCash {
    type Error = InstrumentError;

    fn try_from(raw: SwaptionCashRaw) -> Result<Self, Self::Error> {
        SwaptionCash::new(raw.underlying, raw.expiry_time, raw.settlement_time, raw.is_long)
    }
}

#[derive(Deserialize)]
pub struct SwaptionPhysicalRaw {
    underlying: Swap,
    expiry_time: f64,
    is_long: bool,
}

impl TryFrom<SwaptionPhysicalRaw> for SwaptionPhysical {
    type Error = InstrumentError;

    fn try_from(raw: SwaptionPhysicalRaw) -> Result<Self, Self::Error> {
        SwaptionPhysical::new(raw.underlying, raw.expiry_time, raw.is_long)
    }
}

#[derive(Deserialize)]
pub struct ForexRaw {
    payment_currency1: PaymentFixed,
    payment_currency2: PaymentFixed,
}

impl TryFrom<ForexRaw> for Forex {
    type Error = InstrumentError;

    fn try_from(raw: ForexRaw) -> Result<Self, Self::Error> {
        Forex::new(raw.payment_currency1, raw.payment_currency2)
    }
}

#[derive(Deserialize)]
pub struct ForexOptionVanillaRaw {
    underlying: Forex,
    expiry_time: f64,
    is_call: bool,
    is_long: bool,
}

impl TryFrom<ForexOptionVanillaRaw> for ForexOptionVanilla {
    type Error = InstrumentError;

    fn try_from(raw: ForexOptionVanillaRaw) -> Result<Self, Self::Error> {
        ForexOptionVanilla::new(raw.underlying, raw.expiry_time, raw.is_call, raw.is_long)
    }
}

#[derive(Deserialize)]
pub struct ForexOptionDigitalRaw {
    underlying: Forex,
    expiry_time: f64,
    is_call: bool,
    is_long: bool,
    payout_domestic: bool,
}

impl TryFrom<ForexOptionDigitalRaw> for ForexOptionDigital {
    type Error = InstrumentError;

    fn try_from(raw: ForexOptionDigitalRaw) -> Result<Self, Self::Error> {
        ForexOptionDigital::new(
            raw.underlying,
            raw.expiry_time,
            raw.is_call,
            raw.is_long,
            raw.payout_domestic,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon_json(payment_time: f64, currency: &str) -> String {
        serde_json::json!({
            "CouponFixed": {
                "currency": currency,
                "payment_time": payment_time,
                "payment_year_fraction": 1.0,
                "notional": -100.0,
                "fixed_rate": 0.03,
                "funding_curve": "Funding"
            }
        })
        .to_string()
    }

    // ==========================================================
    // Validation on decode
    // ==========================================================

    #[test]
    fn test_empty_annuity_rejected_on_decode() {
        let result = serde_json::from_str::<Annuity>(r#"{"payments":[]}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Annuity has no payment"), "{}", err);
    }

    #[test]
    fn test_mixed_currency_annuity_rejected_on_decode() {
        let json =
            format!(r#"{{"payments":[{},{}]}}"#, coupon_json(1.0, "USD"), coupon_json(2.0, "EUR"));
        assert!(serde_json::from_str::<Annuity>(&json).is_err());
    }

    #[test]
    fn test_negative_time_rejected_on_decode() {
        let json =
            r#"{"currency":"USD","payment_time":-1.0,"amount":5.0,"funding_curve":"Funding"}"#;
        let err = serde_json::from_str::<PaymentFixed>(json).unwrap_err().to_string();
        assert!(err.contains("Negative payment time"), "{}", err);
    }

    #[test]
    fn test_same_currency_forex_rejected_on_decode() {
        let usd = |amount: f64| PaymentFixed::new(Currency::USD, 1.0, amount, "Funding").unwrap();
        let json = format!(
            r#"{{"payment_currency1":{},"payment_currency2":{}}}"#,
            serde_json::to_string(&usd(1.0)).unwrap(),
            serde_json::to_string(&usd(-1.0)).unwrap()
        );
        assert!(serde_json::from_str::<Forex>(&json).is_err());
    }

    #[test]
    fn test_settlement_before_expiry_rejected_on_decode() {
        let swap =
            Swap::fixed_ibor(Currency::USD, 1.0, 2.0, 1, 2, 1.0, 0.02, true, "F", "L").unwrap();
        let valid = SwaptionCash::new(swap, 1.0, 1.0, true).unwrap();
        let mut value = serde_json::to_value(&valid).unwrap();
        value["settlement_time"] = serde_json::json!(0.5);
        assert!(serde_json::from_value::<SwaptionCash>(value).is_err());
    }

    // ==========================================================
    // Round trip
    // ==========================================================

    #[test]
    fn test_valid_swaption_decodes_through_constructor() {
        let swap =
            Swap::fixed_ibor(Currency::EUR, 1.0, 2.0, 1, 2, 1.0, 0.02, false, "F", "L").unwrap();
        let swaption = SwaptionPhysical::new(swap, 1.0, true).unwrap();
        let json = serde_json::to_string(&swaption).unwrap();
        let decoded: SwaptionPhysical = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, swaption);
        assert_eq!(decoded.strike(), 0.02);
    }
}
