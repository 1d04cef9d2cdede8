//! Single-payment interest rate instruments.
//!
//! All times are year fractions from the valuation date. Notionals are
//! signed: positive receives, negative pays.

use pricer_core::types::Currency;

use crate::instruments::error::{check_accrual, check_time, InstrumentError};

/// Deposit: notional paid at start, notional plus interest received at end.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::Cash;
/// use pricer_core::types::Currency;
///
/// let cash = Cash::new(Currency::EUR, 0.0, 0.5, 0.5, 1_000_000.0, 0.02, "Funding").unwrap();
/// assert_eq!(cash.interest_amount(), 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::CashRaw")
)]
pub struct Cash {
    currency: Currency,
    start_time: f64,
    end_time: f64,
    accrual_factor: f64,
    notional: f64,
    rate: f64,
    funding_curve: String,
}

impl Cash {
    /// Creates a deposit.
    ///
    /// # Errors
    /// Negative times, `end_time < start_time` or a non-positive accrual.
    pub fn new(
        currency: Currency,
        start_time: f64,
        end_time: f64,
        accrual_factor: f64,
        notional: f64,
        rate: f64,
        funding_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("start time", start_time)?;
        check_time("end time", end_time)?;
        if end_time < start_time {
            return Err(InstrumentError::InvalidParameter {
                message: format!("deposit ends at {} before it starts at {}", end_time, start_time),
            });
        }
        check_accrual("accrual factor", accrual_factor)?;
        Ok(Self {
            currency,
            start_time,
            end_time,
            accrual_factor,
            notional,
            rate,
            funding_curve: funding_curve.into(),
        })
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Start time.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End time.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Accrual factor between start and end.
    pub fn accrual_factor(&self) -> f64 {
        self.accrual_factor
    }

    /// Signed notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Deposit rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Interest paid at end: `N · τ · r`.
    pub fn interest_amount(&self) -> f64 {
        self.notional * self.accrual_factor * self.rate
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        &self.funding_curve
    }
}

/// Known amount paid at one time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::PaymentFixedRaw")
)]
pub struct PaymentFixed {
    currency: Currency,
    payment_time: f64,
    amount: f64,
    funding_curve: String,
}

impl PaymentFixed {
    /// Creates a fixed payment.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        amount: f64,
        funding_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("payment time", payment_time)?;
        Ok(Self {
            currency,
            payment_time,
            amount,
            funding_curve: funding_curve.into(),
        })
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Signed amount.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        &self.funding_curve
    }
}

/// Coupon paying `N · τ · K` at the payment time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::CouponFixedRaw")
)]
pub struct CouponFixed {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixed_rate: f64,
    funding_curve: String,
}

impl CouponFixed {
    /// Creates a fixed coupon.
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        fixed_rate: f64,
        funding_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("payment time", payment_time)?;
        check_accrual("payment year fraction", payment_year_fraction)?;
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixed_rate,
            funding_curve: funding_curve.into(),
        })
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual year fraction.
    pub fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }

    /// Signed notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixed rate.
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Paid amount `N · τ · K`.
    pub fn amount(&self) -> f64 {
        self.notional * self.payment_year_fraction * self.fixed_rate
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        &self.funding_curve
    }

    /// Same coupon with another fixed rate.
    pub fn with_fixed_rate(&self, fixed_rate: f64) -> Self {
        Self {
            fixed_rate,
            ..self.clone()
        }
    }
}

/// Floating coupon on an ibor-like index, plus an additive spread.
///
/// Pays `N · τ · (F + s)` where `F` is the simply compounded forward over
/// the fixing period, projected on the forward curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::CouponIborRaw")
)]
pub struct CouponIbor {
    currency: Currency,
    payment_time: f64,
    payment_year_fraction: f64,
    notional: f64,
    fixing_time: f64,
    fixing_period_start_time: f64,
    fixing_period_end_time: f64,
    fixing_year_fraction: f64,
    spread: f64,
    funding_curve: String,
    forward_curve: String,
}

impl CouponIbor {
    /// Creates an ibor coupon.
    ///
    /// # Errors
    /// Negative times, non-positive year fractions, or a fixing period
    /// that ends before it starts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        fixing_time: f64,
        fixing_period_start_time: f64,
        fixing_period_end_time: f64,
        fixing_year_fraction: f64,
        spread: f64,
        funding_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("payment time", payment_time)?;
        check_time("fixing time", fixing_time)?;
        check_time("fixing period start time", fixing_period_start_time)?;
        check_time("fixing period end time", fixing_period_end_time)?;
        check_accrual("payment year fraction", payment_year_fraction)?;
        check_accrual("fixing year fraction", fixing_year_fraction)?;
        if fixing_period_end_time <= fixing_period_start_time {
            return Err(InstrumentError::InvalidParameter {
                message: "fixing period must end after it starts".to_string(),
            });
        }
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixing_time,
            fixing_period_start_time,
            fixing_period_end_time,
            fixing_year_fraction,
            spread,
            funding_curve: funding_curve.into(),
            forward_curve: forward_curve.into(),
        })
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual year fraction of the payment.
    pub fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }

    /// Signed notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixing time.
    pub fn fixing_time(&self) -> f64 {
        self.fixing_time
    }

    /// Start of the fixing period.
    pub fn fixing_period_start_time(&self) -> f64 {
        self.fixing_period_start_time
    }

    /// End of the fixing period.
    pub fn fixing_period_end_time(&self) -> f64 {
        self.fixing_period_end_time
    }

    /// Year fraction of the fixing period.
    pub fn fixing_year_fraction(&self) -> f64 {
        self.fixing_year_fraction
    }

    /// Additive spread.
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        &self.funding_curve
    }

    /// Forward projection curve name.
    pub fn forward_curve(&self) -> &str {
        &self.forward_curve
    }

    /// Same coupon with another notional.
    pub fn with_notional(&self, notional: f64) -> Self {
        Self {
            notional,
            ..self.clone()
        }
    }
}

/// Forward rate agreement settled at the start of the fixing period.
///
/// Pays `N · τ_pay · (F − K) / (1 + τ_pay · F)` at the payment time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::ForwardRateAgreementRaw")
)]
pub struct ForwardRateAgreement {
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

impl ForwardRateAgreement {
    /// Creates an FRA.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        payment_time: f64,
        payment_year_fraction: f64,
        notional: f64,
        fixing_time: f64,
        fixing_period_start_time: f64,
        fixing_period_end_time: f64,
        fixing_year_fraction: f64,
        fixed_rate: f64,
        funding_curve: impl Into<String>,
        forward_curve: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        check_time("payment time", payment_time)?;
        check_time("fixing time", fixing_time)?;
        check_time("fixing period start time", fixing_period_start_time)?;
        check_time("fixing period end time", fixing_period_end_time)?;
        check_accrual("payment year fraction", payment_year_fraction)?;
        check_accrual("fixing year fraction", fixing_year_fraction)?;
        if fixing_period_end_time <= fixing_period_start_time {
            return Err(InstrumentError::InvalidParameter {
                message: "fixing period must end after it starts".to_string(),
            });
        }
        Ok(Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixing_time,
            fixing_period_start_time,
            fixing_period_end_time,
            fixing_year_fraction,
            fixed_rate,
            funding_curve: funding_curve.into(),
            forward_curve: forward_curve.into(),
        })
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_time
    }

    /// Accrual year fraction of the payment.
    pub fn payment_year_fraction(&self) -> f64 {
        self.payment_year_fraction
    }

    /// Signed notional.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Fixing time.
    pub fn fixing_time(&self) -> f64 {
        self.fixing_time
    }

    /// Start of the fixing period.
    pub fn fixing_period_start_time(&self) -> f64 {
        self.fixing_period_start_time
    }

    /// End of the fixing period.
    pub fn fixing_period_end_time(&self) -> f64 {
        self.fixing_period_end_time
    }

    /// Year fraction of the fixing period.
    pub fn fixing_year_fraction(&self) -> f64 {
        self.fixing_year_fraction
    }

    /// Contract rate.
    pub fn fixed_rate(&self) -> f64 {
        self.fixed_rate
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        &self.funding_curve
    }

    /// Forward projection curve name.
    pub fn forward_curve(&self) -> &str {
        &self.forward_curve
    }
}

/// Payment that can sit inside an annuity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payment {
    /// Known amount
    Fixed(PaymentFixed),
    /// Fixed-rate coupon
    CouponFixed(CouponFixed),
    /// Floating coupon
    CouponIbor(CouponIbor),
    /// Forward rate agreement
    ForwardRateAgreement(ForwardRateAgreement),
}

impl Payment {
    /// Variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            Payment::Fixed(_) => "PaymentFixed",
            Payment::CouponFixed(_) => "CouponFixed",
            Payment::CouponIbor(_) => "CouponIbor",
            Payment::ForwardRateAgreement(_) => "ForwardRateAgreement",
        }
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        match self {
            Payment::Fixed(p) => p.currency(),
            Payment::CouponFixed(p) => p.currency(),
            Payment::CouponIbor(p) => p.currency(),
            Payment::ForwardRateAgreement(p) => p.currency(),
        }
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        match self {
            Payment::Fixed(p) => p.payment_time(),
            Payment::CouponFixed(p) => p.payment_time(),
            Payment::CouponIbor(p) => p.payment_time(),
            Payment::ForwardRateAgreement(p) => p.payment_time(),
        }
    }

    /// Discounting curve name.
    pub fn funding_curve(&self) -> &str {
        match self {
            Payment::Fixed(p) => p.funding_curve(),
            Payment::CouponFixed(p) => p.funding_curve(),
            Payment::CouponIbor(p) => p.funding_curve(),
            Payment::ForwardRateAgreement(p) => p.funding_curve(),
        }
    }

    /// Signed notional; the amount for a fixed payment.
    pub fn notional(&self) -> f64 {
        match self {
            Payment::Fixed(p) => p.amount(),
            Payment::CouponFixed(p) => p.notional(),
            Payment::CouponIbor(p) => p.notional(),
            Payment::ForwardRateAgreement(p) => p.notional(),
        }
    }
}

impl From<PaymentFixed> for Payment {
    fn from(p: PaymentFixed) -> Self {
        Payment::Fixed(p)
    }
}

impl From<CouponFixed> for Payment {
    fn from(p: CouponFixed) -> Self {
        Payment::CouponFixed(p)
    }
}

impl From<CouponIbor> for Payment {
    fn from(p: CouponIbor) -> Self {
        Payment::CouponIbor(p)
    }
}

impl From<ForwardRateAgreement> for Payment {
    fn from(p: ForwardRateAgreement) -> Self {
        Payment::ForwardRateAgreement(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================
    // Validation
    // ==========================================================

    #[test]
    fn test_cash_rejects_reversed_period() {
        assert!(Cash::new(Currency::USD, 1.0, 0.5, 0.5, 1.0, 0.01, "Funding").is_err());
    }

    #[test]
    fn test_coupon_rejects_negative_payment_time() {
        let err = CouponFixed::new(Currency::USD, -0.1, 0.5, 1.0, 0.01, "Funding").unwrap_err();
        assert!(matches!(err, InstrumentError::NegativeTime { name: "payment time", .. }));
    }

    #[test]
    fn test_ibor_rejects_empty_fixing_period() {
        let result = CouponIbor::new(
            Currency::EUR, 1.0, 0.5, 1.0, 0.5, 0.5, 0.5, 0.5, 0.0, "Funding", "Forward",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_fra_rejects_zero_year_fraction() {
        let result = ForwardRateAgreement::new(
            Currency::EUR, 0.5, 0.0, 1.0, 0.5, 0.5, 1.0, 0.5, 0.02, "Funding", "Forward",
        );
        assert!(matches!(result, Err(InstrumentError::NegativeAccrual { .. })));
    }

    // ==========================================================
    // Accessors
    // ==========================================================

    #[test]
    fn test_coupon_fixed_amount() {
        let cpn = CouponFixed::new(Currency::GBP, 1.0, 0.25, -100.0, 0.04, "Funding").unwrap();
        assert_eq!(cpn.amount(), -1.0);
        assert_eq!(cpn.with_fixed_rate(0.08).amount(), -2.0);
    }

    #[test]
    fn test_payment_enum_delegates() {
        let p: Payment = PaymentFixed::new(Currency::JPY, 2.0, 5.0, "Funding").unwrap().into();
        assert_eq!(p.kind(), "PaymentFixed");
        assert_eq!(p.payment_time(), 2.0);
        assert_eq!(p.notional(), 5.0);
        assert_eq!(p.funding_curve(), "Funding");
    }
}
