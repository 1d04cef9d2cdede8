//! # pricer_core: Foundation Layer of the Curve Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 3-layer architecture, providing:
//! - Currencies and currency amounts (`types`)
//! - Error types: `PricingError`, `CurrencyError`, `SolverError` (`types::error`)
//! - Yield curves, the named curve bundle, FX rates and delta-quoted
//!   smiles (`market_data`)
//! - Curve and surface sensitivity accumulators (`sensitivity`)
//! - Normal distribution, root finding and quadrature (`math`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - statrs: error function for the normal distribution
//! - thiserror: error enums
//! - serde: serialisation of market data (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{CurveBundle, CurveEnum, YieldCurve};
//! use pricer_core::sensitivity::CurveSensitivity;
//! use pricer_core::types::{Currency, CurrencyAmount};
//!
//! let bundle = CurveBundle::new()
//!     .with_curve("USD Funding", CurveEnum::flat(0.03))
//!     .with_curve_currency("USD Funding", Currency::USD);
//!
//! let curve = bundle.get_curve("USD Funding").unwrap();
//! let df = curve.discount_factor(2.0).unwrap();
//! let pv = CurrencyAmount::new(Currency::USD, 1_000_000.0 * df);
//!
//! // ∂PV/∂r(2) for a zero-coupon payment
//! let sensitivity = CurveSensitivity::of("USD Funding", 2.0, -2.0 * pv.amount());
//! assert!(sensitivity.total("USD Funding") < 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for currencies, curves, bundles and smiles

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod sensitivity;
pub mod types;
