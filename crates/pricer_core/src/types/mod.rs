//! Core value types.
//!
//! This module provides:
//! - `currency`: ISO 4217 currency codes
//! - `amount`: single- and multi-currency amounts
//! - `error`: Structured error types for pricing, currency and solver operations

pub mod amount;
pub mod currency;
pub mod error;

pub use amount::{CurrencyAmount, MultiCurrencyAmount};
pub use currency::Currency;
pub use error::{CurrencyError, PricingError, SolverError};

/// Result alias used throughout the pricing layers.
pub type PricingResult<T> = Result<T, PricingError>;
