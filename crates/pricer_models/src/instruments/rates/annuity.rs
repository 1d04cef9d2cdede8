//! Annuities and two-leg swaps.

use pricer_core::types::Currency;

use super::payment::{CouponFixed, CouponIbor, Payment};
use crate::instruments::error::{check_accrual, check_time, InstrumentError};

/// Ordered sequence of payments in one currency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::AnnuityRaw")
)]
pub struct Annuity {
    payments: Vec<Payment>,
}

impl Annuity {
    /// Creates an annuity.
    ///
    /// # Errors
    /// - `InstrumentError::EmptyAnnuity` if `payments` is empty
    /// - `InstrumentError::CurrencyMismatch` if currencies differ
    pub fn new(payments: Vec<Payment>) -> Result<Self, InstrumentError> {
        let first = payments.first().ok_or(InstrumentError::EmptyAnnuity)?;
        let currency = first.currency();
        if let Some(other) = payments.iter().find(|p| p.currency() != currency) {
            return Err(InstrumentError::CurrencyMismatch {
                expected: currency.to_string(),
                actual: other.currency().to_string(),
            });
        }
        Ok(Self { payments })
    }

    /// Currency shared by all payments.
    pub fn currency(&self) -> Currency {
        self.payments[0].currency()
    }

    /// Payments in schedule order.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Number of payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Always false; construction rejects empty annuities.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Payment at `index`.
    pub fn payment(&self, index: usize) -> Option<&Payment> {
        self.payments.get(index)
    }

    /// Last payment.
    pub fn last_payment(&self) -> &Payment {
        &self.payments[self.payments.len() - 1]
    }

    /// True when the first payment's notional is negative.
    pub fn is_payer(&self) -> bool {
        self.payments[0].notional() < 0.0
    }

    /// Fixed coupons, skipping every other payment type.
    pub fn fixed_coupons(&self) -> impl Iterator<Item = &CouponFixed> {
        self.payments.iter().filter_map(|p| match p {
            Payment::CouponFixed(c) => Some(c),
            _ => None,
        })
    }

    /// Ibor coupons, skipping every other payment type.
    pub fn ibor_coupons(&self) -> impl Iterator<Item = &CouponIbor> {
        self.payments.iter().filter_map(|p| match p {
            Payment::CouponIbor(c) => Some(c),
            _ => None,
        })
    }

    /// True when every payment is a fixed coupon.
    pub fn is_fixed_coupon_leg(&self) -> bool {
        self.fixed_coupons().count() == self.payments.len()
    }

    /// True when every payment is an ibor coupon.
    pub fn is_ibor_coupon_leg(&self) -> bool {
        self.ibor_coupons().count() == self.payments.len()
    }
}

/// Two annuity legs in the same currency.
///
/// For fixed/ibor swaps the first leg is the fixed leg. A payer swap pays
/// fixed, so its first leg carries a negative notional.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::Swap;
/// use pricer_core::types::Currency;
///
/// let swap = Swap::fixed_ibor(
///     Currency::EUR, 1.0, 5.0, 1, 2, 1_000_000.0, 0.03, true, "Funding", "Forward",
/// ).unwrap();
/// assert!(swap.is_payer());
/// assert_eq!(swap.first_leg().len(), 5);
/// assert_eq!(swap.second_leg().len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::SwapRaw")
)]
pub struct Swap {
    first_leg: Annuity,
    second_leg: Annuity,
}

impl Swap {
    /// Creates a swap from two legs.
    ///
    /// # Errors
    /// `InstrumentError::CurrencyMismatch` if the legs differ in currency.
    pub fn new(first_leg: Annuity, second_leg: Annuity) -> Result<Self, InstrumentError> {
        if first_leg.currency() != second_leg.currency() {
            return Err(InstrumentError::CurrencyMismatch {
                expected: first_leg.currency().to_string(),
                actual: second_leg.currency().to_string(),
            });
        }
        Ok(Self {
            first_leg,
            second_leg,
        })
    }

    /// Builds a regular fixed/ibor swap.
    ///
    /// Periods are equal year fractions: `1 / fixed_per_year` on the fixed
    /// leg and `1 / ibor_per_year` on the ibor leg. Ibor coupons fix at the
    /// start of their period and pay at its end. The payer flag sets the
    /// sign of the fixed notional; the ibor notional has the opposite sign.
    #[allow(clippy::too_many_arguments)]
    pub fn fixed_ibor(
        currency: Currency,
        settlement_time: f64,
        tenor_years: f64,
        fixed_per_year: u32,
        ibor_per_year: u32,
        notional: f64,
        fixed_rate: f64,
        is_payer: bool,
        funding_curve: &str,
        forward_curve: &str,
    ) -> Result<Self, InstrumentError> {
        check_time("settlement time", settlement_time)?;
        check_accrual("tenor", tenor_years)?;
        if fixed_per_year == 0 || ibor_per_year == 0 {
            return Err(InstrumentError::InvalidParameter {
                message: "payment frequency must be positive".to_string(),
            });
        }
        let fixed_notional = if is_payer { -notional.abs() } else { notional.abs() };

        let fixed_tau = 1.0 / f64::from(fixed_per_year);
        let fixed_count = periods(tenor_years, fixed_tau)?;
        let fixed = (1..=fixed_count)
            .map(|i| {
                CouponFixed::new(
                    currency,
                    settlement_time + i as f64 * fixed_tau,
                    fixed_tau,
                    fixed_notional,
                    fixed_rate,
                    funding_curve,
                )
                .map(Payment::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ibor_tau = 1.0 / f64::from(ibor_per_year);
        let ibor_count = periods(tenor_years, ibor_tau)?;
        let ibor = (0..ibor_count)
            .map(|i| {
                let start = settlement_time + i as f64 * ibor_tau;
                let end = start + ibor_tau;
                CouponIbor::new(
                    currency,
                    end,
                    ibor_tau,
                    -fixed_notional,
                    start,
                    start,
                    end,
                    ibor_tau,
                    0.0,
                    funding_curve,
                    forward_curve,
                )
                .map(Payment::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(Annuity::new(fixed)?, Annuity::new(ibor)?)
    }

    /// First leg.
    pub fn first_leg(&self) -> &Annuity {
        &self.first_leg
    }

    /// Second leg.
    pub fn second_leg(&self) -> &Annuity {
        &self.second_leg
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.first_leg.currency()
    }

    /// True when the first leg pays.
    pub fn is_payer(&self) -> bool {
        self.first_leg.is_payer()
    }

    /// Latest payment time over both legs.
    pub fn last_payment_time(&self) -> f64 {
        self.first_leg
            .last_payment()
            .payment_time()
            .max(self.second_leg.last_payment().payment_time())
    }
}

/// Number of whole periods of length `tau` in `tenor`.
fn periods(tenor: f64, tau: f64) -> Result<usize, InstrumentError> {
    let n = (tenor / tau).round();
    if n < 1.0 || ((n * tau) - tenor).abs() > 1e-8 {
        return Err(InstrumentError::InvalidParameter {
            message: format!("tenor {} is not a whole number of {} periods", tenor, tau),
        });
    }
    Ok(n as usize)
}
