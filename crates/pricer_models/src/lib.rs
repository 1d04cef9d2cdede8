//! # Pricer Models (L2: Business Logic)
//!
//! Instrument derivatives, analytical option formulas and model parameters.
//!
//! This crate provides:
//! - Instrument definitions (deposits, coupons, FRAs, swaps, swaptions,
//!   FX forwards and options) and the [`instruments::InstrumentVisitor`]
//!   dispatch protocol
//! - Black and Bachelier formulas with adjoints
//! - SABR volatility, its parameter surface and the right-tail extrapolation
//! - Hull-White one-factor and G2++ piecewise-constant parameters
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static, exhaustive dispatch
//! - **Validated constructors** returning typed errors
//! - **Hand-written adjoints** next to every formula used for sensitivities

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
