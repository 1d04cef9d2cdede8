//! Model parameters and model formulas.
//!
//! This module provides:
//! - [`SabrParameters`] and [`SabrParameterSurface`]: Hagan SABR volatility
//!   with its adjoint
//! - [`SabrExtrapolationRight`]: SABR prices with a right-tail extrapolation
//! - [`rates`]: Hull-White one-factor and G2++ parameters
//! - [`ModelError`]: parameter validation errors

pub mod error;
mod jet;
pub mod rates;
#[cfg(feature = "serde")]
mod raw;
pub mod sabr;
pub mod sabr_extrapolation;

pub use error::ModelError;
pub use rates::{G2ppParameters, HullWhiteParameters};
pub use sabr::{SabrParameter, SabrParameterSurface, SabrParameters, SabrVolatilityAdjoint};
pub use sabr_extrapolation::{SabrExtrapolationRight, SabrPriceAdjoint};
