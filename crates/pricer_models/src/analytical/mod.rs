//! Analytical option formulas on a forward.
//!
//! This module provides:
//! - [`Black`]: lognormal formula with first- and second-order adjoints
//! - [`Bachelier`]: normal formula, used for swap rates under G2++
//! - [`AnalyticalError`]: input validation errors
//!
//! Prices are undiscounted; callers multiply by the relevant annuity or
//! discount factor.

pub mod bachelier;
pub mod black;
pub mod error;

pub use bachelier::{Bachelier, BachelierPriceAdjoint};
pub use black::{Black, BlackPriceAdjoint};
pub use error::AnalyticalError;
