//! Market data seen by the pricing methods.
//!
//! Every bundle carries a [`CurveBundle`] plus the model data of one
//! family of methods. [`CurveProvider`] exposes the curves so that
//! calculators can route linear instruments to the discounting method
//! whatever bundle they were given.

use pricer_core::market_data::{CurveBundle, FxMatrix, SmileDeltaTermStructure};
use pricer_core::types::Currency;
use pricer_models::models::{G2ppParameters, HullWhiteParameters, SabrParameterSurface};

/// Market data that contains a curve bundle.
pub trait CurveProvider {
    /// Curves used for discounting and forward projection.
    fn curves(&self) -> &CurveBundle;
}

impl CurveProvider for CurveBundle {
    #[inline]
    fn curves(&self) -> &CurveBundle {
        self
    }
}

/// Curves with a SABR parameter surface by expiry and tenor.
#[derive(Debug, Clone)]
pub struct SabrDataBundle {
    curves: CurveBundle,
    surface: SabrParameterSurface,
}

impl SabrDataBundle {
    /// Creates the bundle.
    pub fn new(curves: CurveBundle, surface: SabrParameterSurface) -> Self {
        Self { curves, surface }
    }

    /// SABR parameters.
    pub fn surface(&self) -> &SabrParameterSurface {
        &self.surface
    }

    /// Same surface on other curves.
    pub fn with_curves(&self, curves: CurveBundle) -> Self {
        Self {
            curves,
            surface: self.surface.clone(),
        }
    }

    /// Same curves with another surface.
    pub fn with_surface(&self, surface: SabrParameterSurface) -> Self {
        Self {
            curves: self.curves.clone(),
            surface,
        }
    }
}

impl CurveProvider for SabrDataBundle {
    #[inline]
    fn curves(&self) -> &CurveBundle {
        &self.curves
    }
}

/// Curves, spot rates and a delta-quoted smile for one currency pair.
///
/// The smile quotes volatilities of the pair `(ccy1, ccy2)`: strikes are
/// units of `ccy2` per unit of `ccy1`.
#[derive(Debug, Clone)]
pub struct ForexSmileDataBundle {
    curves: CurveBundle,
    fx_matrix: FxMatrix,
    smile: SmileDeltaTermStructure,
    currency_pair: (Currency, Currency),
}

impl ForexSmileDataBundle {
    /// Creates the bundle.
    pub fn new(
        curves: CurveBundle,
        fx_matrix: FxMatrix,
        smile: SmileDeltaTermStructure,
        currency_pair: (Currency, Currency),
    ) -> Self {
        Self {
            curves,
            fx_matrix,
            smile,
            currency_pair,
        }
    }

    /// Spot rates.
    pub fn fx_matrix(&self) -> &FxMatrix {
        &self.fx_matrix
    }

    /// Smile term structure.
    pub fn smile(&self) -> &SmileDeltaTermStructure {
        &self.smile
    }

    /// Currency pair of the smile.
    pub fn currency_pair(&self) -> (Currency, Currency) {
        self.currency_pair
    }

    /// Same data on other curves.
    pub fn with_curves(&self, curves: CurveBundle) -> Self {
        Self {
            curves,
            ..self.clone()
        }
    }

    /// Same data with other spot rates.
    pub fn with_fx_matrix(&self, fx_matrix: FxMatrix) -> Self {
        Self {
            fx_matrix,
            ..self.clone()
        }
    }

    /// Same data with another smile.
    pub fn with_smile(&self, smile: SmileDeltaTermStructure) -> Self {
        Self {
            smile,
            ..self.clone()
        }
    }
}

impl CurveProvider for ForexSmileDataBundle {
    #[inline]
    fn curves(&self) -> &CurveBundle {
        &self.curves
    }
}

/// Curves with Hull-White one-factor parameters.
#[derive(Debug, Clone)]
pub struct HullWhiteDataBundle {
    curves: CurveBundle,
    parameters: HullWhiteParameters,
}

impl HullWhiteDataBundle {
    /// Creates the bundle.
    pub fn new(curves: CurveBundle, parameters: HullWhiteParameters) -> Self {
        Self { curves, parameters }
    }

    /// Model parameters.
    pub fn parameters(&self) -> &HullWhiteParameters {
        &self.parameters
    }

    /// Same parameters on other curves.
    pub fn with_curves(&self, curves: CurveBundle) -> Self {
        Self {
            curves,
            parameters: self.parameters.clone(),
        }
    }
}

impl CurveProvider for HullWhiteDataBundle {
    #[inline]
    fn curves(&self) -> &CurveBundle {
        &self.curves
    }
}

/// Curves with G2++ parameters.
#[derive(Debug, Clone)]
pub struct G2ppDataBundle {
    curves: CurveBundle,
    parameters: G2ppParameters,
}

impl G2ppDataBundle {
    /// Creates the bundle.
    pub fn new(curves: CurveBundle, parameters: G2ppParameters) -> Self {
        Self { curves, parameters }
    }

    /// Model parameters.
    pub fn parameters(&self) -> &G2ppParameters {
        &self.parameters
    }

    /// Same parameters on other curves.
    pub fn with_curves(&self, curves: CurveBundle) -> Self {
        Self {
            curves,
            parameters: self.parameters.clone(),
        }
    }
}

impl CurveProvider for G2ppDataBundle {
    #[inline]
    fn curves(&self) -> &CurveBundle {
        &self.curves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::{CurveEnum, SmileDeltaParameters};
    use pricer_models::models::SabrParameters;

    fn curves() -> CurveBundle {
        CurveBundle::new().with_curve("Funding", CurveEnum::flat(0.03))
    }

    #[test]
    fn test_bundles_expose_curves() {
        let sabr = SabrDataBundle::new(
            curves(),
            SabrParameterSurface::constant(SabrParameters::new(0.05, 0.5, -0.25, 0.5).unwrap()),
        );
        let hw =
            HullWhiteDataBundle::new(curves(), HullWhiteParameters::constant(0.01, 0.01).unwrap());
        assert!(sabr.curves().contains("Funding"));
        assert!(hw.curves().contains("Funding"));
        assert!(curves().curves().contains("Funding"));
    }

    #[test]
    fn test_with_curves_keeps_model_data() {
        let hw =
            HullWhiteDataBundle::new(curves(), HullWhiteParameters::constant(0.02, 0.01).unwrap());
        let other = hw.with_curves(CurveBundle::new().with_curve("Other", CurveEnum::flat(0.01)));
        assert!(!other.curves().contains("Funding"));
        assert_eq!(other.parameters().mean_reversion(), 0.02);
    }

    #[test]
    fn test_forex_bundle_replacements() {
        let smile = SmileDeltaTermStructure::new(vec![
            SmileDeltaParameters::from_quotes(1.0, 0.10, vec![0.25], &[0.0], &[0.0]).unwrap(),
        ])
        .unwrap();
        let fx = FxMatrix::new(Currency::USD).with_rate(Currency::EUR, 1.4).unwrap();
        let bundle = ForexSmileDataBundle::new(curves(), fx, smile, (Currency::EUR, Currency::USD));
        let moved = bundle
            .with_fx_matrix(FxMatrix::new(Currency::USD).with_rate(Currency::EUR, 1.5).unwrap());
        assert_eq!(moved.currency_pair(), (Currency::EUR, Currency::USD));
        assert!(
            (moved.fx_matrix().fx_rate(Currency::EUR, Currency::USD).unwrap() - 1.5).abs() < 1e-15
        );
    }

    #[test]
    fn test_bundles_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SabrDataBundle>();
        assert_send_sync::<ForexSmileDataBundle>();
        assert_send_sync::<HullWhiteDataBundle>();
        assert_send_sync::<G2ppDataBundle>();
    }
}
