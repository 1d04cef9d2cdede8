//! European swaptions on fixed/ibor swaps.
//!
//! A physical-delivery swaption enters the underlying swap at expiry. A
//! cash-settled swaption pays, at settlement, the swap's value computed
//! with the cash annuity at the fixing swap rate.

use pricer_core::types::Currency;

use super::annuity::Swap;
use crate::instruments::error::{check_time, InstrumentError};

/// Checks the fixed/ibor shape and returns the common fixed rate.
fn validate_underlying(underlying: &Swap, expiry_time: f64) -> Result<f64, InstrumentError> {
    check_time("expiry time", expiry_time)?;
    if !underlying.first_leg().is_fixed_coupon_leg() {
        return Err(InstrumentError::InvalidLeg {
            message: "first leg must contain only fixed coupons".to_string(),
        });
    }
    if !underlying.second_leg().is_ibor_coupon_leg() {
        return Err(InstrumentError::InvalidLeg {
            message: "second leg must contain only ibor coupons".to_string(),
        });
    }
    let strike = underlying
        .first_leg()
        .fixed_coupons()
        .next()
        .map(|c| c.fixed_rate())
        .ok_or(InstrumentError::EmptyAnnuity)?;
    if underlying
        .first_leg()
        .fixed_coupons()
        .any(|c| (c.fixed_rate() - strike).abs() > 1e-12)
    {
        return Err(InstrumentError::InvalidLeg {
            message: "fixed coupons must share one rate".to_string(),
        });
    }
    Ok(strike)
}

/// Cash-settled European swaption.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::SwaptionCashRaw")
)]
pub struct SwaptionCash {
    underlying: Swap,
    expiry_time: f64,
    settlement_time: f64,
    is_long: bool,
    strike: f64,
}

impl SwaptionCash {
    /// Creates a cash-settled swaption.
    ///
    /// # Errors
    /// Negative times, settlement before expiry, or an underlying that is
    /// not a fixed/ibor swap with a single fixed rate.
    pub fn new(
        underlying: Swap,
        expiry_time: f64,
        settlement_time: f64,
        is_long: bool,
    ) -> Result<Self, InstrumentError> {
        let strike = validate_underlying(&underlying, expiry_time)?;
        check_time("settlement time", settlement_time)?;
        if settlement_time < expiry_time {
            return Err(InstrumentError::InvalidParameter {
                message: "settlement precedes expiry".to_string(),
            });
        }
        Ok(Self {
            underlying,
            expiry_time,
            settlement_time,
            is_long,
            strike,
        })
    }

    /// Underlying swap.
    pub fn underlying(&self) -> &Swap {
        &self.underlying
    }

    /// Expiry time.
    pub fn expiry_time(&self) -> f64 {
        self.expiry_time
    }

    /// Settlement time.
    pub fn settlement_time(&self) -> f64 {
        self.settlement_time
    }

    /// Long or short.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// Fixed rate of the underlying.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Payer swaption.
    pub fn is_call(&self) -> bool {
        self.underlying.is_payer()
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.underlying.currency()
    }

    /// Last payment minus settlement.
    pub fn tenor(&self) -> f64 {
        self.underlying.last_payment_time() - self.settlement_time
    }
}

/// Physical-delivery European swaption.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::instruments::raw::SwaptionPhysicalRaw")
)]
pub struct SwaptionPhysical {
    underlying: Swap,
    expiry_time: f64,
    is_long: bool,
    strike: f64,
}

impl SwaptionPhysical {
    /// Creates a physical-delivery swaption.
    pub fn new(underlying: Swap, expiry_time: f64, is_long: bool) -> Result<Self, InstrumentError> {
        let strike = validate_underlying(&underlying, expiry_time)?;
        Ok(Self {
            underlying,
            expiry_time,
            is_long,
            strike,
        })
    }

    /// Underlying swap.
    pub fn underlying(&self) -> &Swap {
        &self.underlying
    }

    /// Expiry time.
    pub fn expiry_time(&self) -> f64 {
        self.expiry_time
    }

    /// Start of the first ibor fixing period.
    pub fn settlement_time(&self) -> f64 {
        self.underlying
            .second_leg()
            .ibor_coupons()
            .next()
            .map(|c| c.fixing_period_start_time())
            .unwrap_or(self.expiry_time)
    }

    /// Long or short.
    pub fn is_long(&self) -> bool {
        self.is_long
    }

    /// Fixed rate of the underlying.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Payer swaption.
    pub fn is_call(&self) -> bool {
        self.underlying.is_payer()
    }

    /// Currency.
    pub fn currency(&self) -> Currency {
        self.underlying.currency()
    }

    /// Last payment minus settlement.
    pub fn tenor(&self) -> f64 {
        self.underlying.last_payment_time() - self.settlement_time()
    }
}
