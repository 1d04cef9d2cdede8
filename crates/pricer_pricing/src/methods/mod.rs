//! Pricing methods: one module per model, one function per measure.
//!
//! Every method is a set of free functions taking an instrument and the
//! market data it needs, returning `PricingResult`. Curve sensitivities
//! are computed by a backward sweep through the pricing formula and are
//! reported per curve node as `∂PV/∂r(t)`.
//!
//! - [`discounting`]: linear instruments
//! - [`forex`]: FX forwards and Black FX options
//! - [`swaption`]: SABR, Hull-White and G2++ swaptions

pub mod discounting;
pub mod forex;
pub mod swaption;
