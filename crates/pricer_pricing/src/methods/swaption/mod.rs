//! European swaption methods.
//!
//! - [`sabr`]: Black on the forward swap rate with SABR volatility and a
//!   right-tail extrapolation, for cash and physical settlement
//! - [`hull_white`]: one-factor Gaussian model; explicit formula for
//!   physical delivery, integration and expansion for cash settlement
//! - [`g2pp`]: two-factor Gaussian model for physical delivery
//!
//! The Gaussian methods work on the [cash-flow equivalents](common) of the
//! underlying swap.

pub mod common;
pub mod g2pp;
pub mod hull_white;
pub mod sabr;

pub use sabr::SabrSensitivity;
