//! European FX options on a [`Forex`] underlying.
//!
//! A call gives the right to receive currency 1 against currency 2 at the
//! strike `−amount₂ / amount₁`. Expiry must not be after the payment time
//! of the underlying.

use pricer_core::types::Currency;

use super::forex::Forex;
use crate::instruments::error::{check_time, InstrumentError};

fn check_expiry(underlying: &Forex, expiry_time: f64) -> Result<(), InstrumentError> {
    check_time("expiry time", expiry_time)?;
    if expiry_time > underlying.payment_time() + 1e-10 {
        return Err(InstrumentError::InvalidParameter {
            message: format!(
                "expiry {} after payment time {}",
                expiry_time,
                underlying.payment_time()
            ),
        });
    }
    Ok(())
}

/// Vanilla European FX option.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::fx::{Forex, ForexOptionVanilla};
/// use pricer_models::instruments::rates::PaymentFixed;
/// use pricer_core::types::Currency;
///
/// let forex = Forex::new(
///     PaymentFixed::new(Currency::EUR, 1.0, 100.0, "EUR Funding").unwrap(),
///     PaymentFixed::new(Currency::USD, 1.0, -140.0, "USD Funding").unwrap(),
/// ).unwrap();
/// let call = ForexOptionVanilla::new(forex, 0.98, true, true).unwrap();
/// assert!((call.strike() - 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::ForexOptionVanillaRaw")
)]
pub struct ForexOptionVanilla {
    underlying: Forex,
    expiry_time: f64,
    is_call: bool,
    is_long: bool,
}

impl ForexOptionVanilla {
    /// Creates a vanilla option.
    pub fn new(
        underlying: Forex,
        expiry_time: f64,
        is_call: bool,
        is_long: bool,
    ) -> Result<Self, InstrumentError> {
        check_expiry(&underlying, expiry_time)?;
        Ok(Self {
            underlying,
            expiry_time,
            is_call,
            is_long,
        })
    }

    /// Underlying forward.
    pub fn underlying(&self) -> &Forex {
        &self.underlying
    }

    /// Expiry time.
    pub fn expiry_time(&self) -> f64 {
        self.expiry_time
    }

    /// Call or put.
    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// Long or short.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// Strike in currency 2 per unit of currency 1.
    pub fn strike(&self) -> f64 {
        self.underlying.strike()
    }

    /// Domestic currency.
    pub fn currency(&self) -> Currency {
        self.underlying.currency2()
    }
}

/// Digital (cash-or-nothing) European FX option.
///
/// With a domestic payout the option pays `|amount₂|` in currency 2 when
/// it ends in the money. With a foreign payout it pays `|amount₁|` in
/// currency 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::ForexOptionDigitalRaw")
)]
pub struct ForexOptionDigital {
    underlying: Forex,
    expiry_time: f64,
    is_call: bool,
    is_long: bool,
    payout_domestic: bool,
}

impl ForexOptionDigital {
    /// Creates a digital option.
    pub fn new(
        underlying: Forex,
        expiry_time: f64,
        is_call: bool,
        is_long: bool,
        payout_domestic: bool,
    ) -> Result<Self, InstrumentError> {
        check_expiry(&underlying, expiry_time)?;
        Ok(Self {
            underlying,
            expiry_time,
            is_call,
            is_long,
            payout_domestic,
        })
    }

    /// Underlying forward.
    pub fn underlying(&self) -> &Forex {
        &self.underlying
    }

    /// Expiry time.
    pub fn expiry_time(&self) -> f64 {
        self.expiry_time
    }

    /// Call or put.
    pub fn is_call(&self) -> bool {
        self.is_call
    }

    /// Long or short.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// True when the payout is in currency 2.
    pub fn payout_domestic(&self) -> bool {
        self.payout_domestic
    }

    /// Strike in currency 2 per unit of currency 1.
    pub fn strike(&self) -> f64 {
        self.underlying.strike()
    }

    /// Currency of the payout.
    pub fn payout_currency(&self) -> Currency {
        if self.payout_domestic {
            self.underlying.currency2()
        } else {
            self.underlying.currency1()
        }
    }
}
