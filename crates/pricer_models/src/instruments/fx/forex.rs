//! Foreign exchange forward as a pair of payments.

use pricer_core::types::Currency;

use crate::instruments::error::InstrumentError;
use crate::instruments::rates::PaymentFixed;

/// Exchange of two fixed amounts in different currencies at one time.
///
/// The first payment is in the foreign currency (currency 1), the second
/// in the domestic currency (currency 2). Amounts have opposite signs.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::fx::Forex;
/// use pricer_models::instruments::rates::PaymentFixed;
/// use pricer_core::types::Currency;
///
/// let eur = PaymentFixed::new(Currency::EUR, 0.75, 1_000_000.0, "EUR Funding").unwrap();
/// let usd = PaymentFixed::new(Currency::USD, 0.75, -1_450_000.0, "USD Funding").unwrap();
/// let forex = Forex::new(eur, usd).unwrap();
/// assert!((forex.strike() - 1.45).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::ForexRaw")
)]
pub struct Forex {
    payment_currency1: PaymentFixed,
    payment_currency2: PaymentFixed,
}

impl Forex {
    /// Creates an FX forward.
    ///
    /// # Errors
    /// Same currency on both sides, different payment times, or amounts
    /// that do not have opposite signs.
    pub fn new(
        payment_currency1: PaymentFixed,
        payment_currency2: PaymentFixed,
    ) -> Result<Self, InstrumentError> {
        if payment_currency1.currency() == payment_currency2.currency() {
            return Err(InstrumentError::InvalidParameter {
                message: "forex payments must be in different currencies".to_string(),
            });
        }
        if (payment_currency1.payment_time() - payment_currency2.payment_time()).abs() > 1e-10 {
            return Err(InstrumentError::InvalidParameter {
                message: "forex payments must share one payment time".to_string(),
            });
        }
        if payment_currency1.amount() * payment_currency2.amount() >= 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: "forex amounts must have opposite signs".to_string(),
            });
        }
        Ok(Self {
            payment_currency1,
            payment_currency2,
        })
    }

    /// Foreign payment.
    pub fn payment_currency1(&self) -> &PaymentFixed {
        &self.payment_currency1
    }

    /// Domestic payment.
    pub fn payment_currency2(&self) -> &PaymentFixed {
        &self.payment_currency2
    }

    /// Foreign currency.
    pub fn currency1(&self) -> Currency {
        self.payment_currency1.currency()
    }

    /// Domestic currency.
    pub fn currency2(&self) -> Currency {
        self.payment_currency2.currency()
    }

    /// Payment time.
    pub fn payment_time(&self) -> f64 {
        self.payment_currency1.payment_time()
    }

    /// Domestic units paid per foreign unit: `−amount₂ / amount₁`.
    pub fn strike(&self) -> f64 {
        -self.payment_currency2.amount() / self.payment_currency1.amount()
    }
}
