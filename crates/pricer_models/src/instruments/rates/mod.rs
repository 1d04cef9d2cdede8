//! Interest rate instruments.
//!
//! This module provides:
//! - Single payments: [`Cash`], [`PaymentFixed`], [`CouponFixed`],
//!   [`CouponIbor`], [`ForwardRateAgreement`]
//! - [`Payment`]: the payments an annuity can hold
//! - [`Annuity`] and [`Swap`]
//! - [`SwaptionCash`] and [`SwaptionPhysical`]

mod annuity;
mod payment;
mod swaption;

pub use annuity::{Annuity, Swap};
pub use payment::{Cash, CouponFixed, CouponIbor, ForwardRateAgreement, Payment, PaymentFixed};
pub use swaption::{SwaptionCash, SwaptionPhysical};
