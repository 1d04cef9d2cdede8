//! Gaussian short-rate models.
//!
//! This module provides piecewise-constant parameters for:
//! - [`HullWhiteParameters`]: Hull-White one-factor
//! - [`G2ppParameters`]: two-factor G2++
//!
//! # Models
//!
//! ## Hull-White 1F
//!
//! ```text
//! dr(t) = [theta(t) - a * r(t)] * dt + sigma(t) * dW(t)
//! ```
//!
//! ## G2++
//!
//! ```text
//! r(t) = x1(t) + x2(t) + phi(t),  dx_k = -a_k x_k dt + sigma_k(t) dW_k
//! ```

pub mod g2pp;
pub mod hull_white;

pub use g2pp::G2ppParameters;
pub use hull_white::HullWhiteParameters;
