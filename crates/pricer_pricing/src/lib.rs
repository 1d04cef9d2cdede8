//! # Pricer Pricing (L3: Valuation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing values the instruments of `pricer_models` against the
//! market data of `pricer_core`:
//! - Model data bundles: curves with a SABR surface, Hull-White or G2++
//!   parameters, or an FX smile ([`context`])
//! - Pricing methods, one module per model with one function per measure
//!   ([`methods`])
//! - Calculators routing each instrument variant to its method
//!   ([`calculators`])
//! - Numerical settings loaded from TOML or the environment ([`config`])
//! - Parallel portfolio valuation on rayon ([`batch`])
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{CurveBundle, CurveEnum};
//! use pricer_core::types::Currency;
//! use pricer_models::instruments::{rates::Swap, rates::SwaptionPhysical, InstrumentDerivative};
//! use pricer_models::models::HullWhiteParameters;
//! use pricer_pricing::{HullWhiteDataBundle, PresentValueHullWhiteCalculator, SwaptionRoute};
//!
//! let curves = CurveBundle::new()
//!     .with_curve("EUR Discounting", CurveEnum::flat(0.02))
//!     .with_curve("EUR Euribor 3M", CurveEnum::flat(0.025));
//! let swap = Swap::fixed_ibor(
//!     Currency::EUR, 1.0, 5.0, 1, 4, 1e6, 0.025, true, "EUR Discounting", "EUR Euribor 3M",
//! ).unwrap();
//! let swaption = SwaptionPhysical::new(swap, 0.99, true).unwrap();
//!
//! let parameters = HullWhiteParameters::constant(0.05, 0.01).unwrap();
//! let bundle = HullWhiteDataBundle::new(curves, parameters);
//! let calculator = PresentValueHullWhiteCalculator::new(SwaptionRoute::Integration);
//! let pv = InstrumentDerivative::from(swaption).accept(&calculator, &bundle).unwrap();
//! assert!(pv.amount(Currency::EUR) > 0.0);
//! ```
//!
//! ## Logging
//!
//! Methods emit `tracing` events: `debug` at entry with the instrument and
//! curve names, `trace` for forwards and exercise boundaries, `warn` when a
//! numerical fallback is taken. Install any subscriber to see them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod batch;
pub mod calculators;
pub mod config;
pub mod context;
pub mod methods;

pub use calculators::{
    CurrencyExposureBlackForexCalculator, CurveSensitivityBlackForexCalculator,
    CurveSensitivityCalculator, CurveSensitivityG2ppCalculator, CurveSensitivityHullWhiteCalculator,
    CurveSensitivitySabrCalculator, ParRateCalculator, PresentValueBasisPointCalculator,
    PresentValueBlackForexCalculator, PresentValueCalculator, PresentValueG2ppCalculator,
    PresentValueHullWhiteCalculator, PresentValueSabrCalculator, SabrSensitivityCalculator,
    SwaptionRoute, VolatilitySensitivityBlackForexCalculator,
};
pub use config::{ConfigError, PricingConfig};
pub use context::{
    CurveProvider, ForexSmileDataBundle, G2ppDataBundle, HullWhiteDataBundle, SabrDataBundle,
};
pub use methods::forex::{ForexVolatilityNodeSensitivity, ForexVolatilitySensitivity};
pub use methods::swaption::SabrSensitivity;
