//! Market data context for curve-based valuation.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and implementations (flat, interpolated, shifted)
//! - [`bundle`]: Named curve bundle with currency side table
//! - [`fx_matrix`]: Spot FX rates between currencies
//! - [`surfaces`]: Black smile term structure quoted in delta
//! - [`error`]: Market data error types
//!
//! A bundle is built once per valuation and never mutated by pricing
//! code. Bumped variants for finite-difference checks are new bundles.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{CurveBundle, CurveEnum, YieldCurve};
//!
//! let bundle = CurveBundle::new()
//!     .with_curve("Funding", CurveEnum::flat(0.05))
//!     .with_curve("Forward", CurveEnum::flat(0.055));
//!
//! let df = bundle.get_curve("Funding").unwrap().discount_factor(1.0).unwrap();
//! assert!((df - (-0.05_f64).exp()).abs() < 1e-15);
//! assert!(bundle.get_curve("Missing").is_err());
//! ```

pub mod bundle;
pub mod curves;
pub mod error;
pub mod fx_matrix;
#[cfg(feature = "serde")]
mod raw;
pub mod surfaces;

pub use bundle::CurveBundle;
pub use curves::{CurveEnum, CurveShift, FlatCurve, InterpolatedCurve, ShiftedCurve, YieldCurve};
pub use error::MarketDataError;
pub use fx_matrix::FxMatrix;
pub use surfaces::{SmileDeltaParameters, SmileDeltaTermStructure, SmileVolatilityAdjoint};
