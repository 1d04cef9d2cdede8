//! Volatility surfaces.
//!
//! This module provides:
//! - [`SmileDeltaParameters`]: one expiry of a delta-quoted Black smile
//! - [`SmileDeltaTermStructure`]: smiles by expiry with total-variance time interpolation
//! - [`SmileVolatilityAdjoint`]: volatility with its node sensitivities

mod smile;

pub use smile::{SmileDeltaParameters, SmileDeltaTermStructure, SmileVolatilityAdjoint};
