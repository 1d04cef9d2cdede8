//! Deserialization shapes of the model parameters.
//!
//! Decoded parameters are rebuilt through their constructors so that a
//! malformed grid is rejected at load time instead of at pricing time.

use serde::Deserialize;

use super::error::ModelError;
use super::rates::{G2ppParameters, HullWhiteParameters};
use super::sabr::{SabrParameterSurface, SabrParameters};

#[derive(Deserialize)]
pub struct SabrParametersRaw {
    alpha: f64,
    beta: f64,
    rho: f64,
    nu: f64,
}

impl TryFrom<SabrParametersRaw> for SabrParameters {
    type Error = ModelError;

    fn try_from(raw: SabrParametersRaw) -> Result<Self, Self::Error> {
        SabrParameters::new(raw.alpha, raw.beta, raw.rho, raw.nu)
    }
}

#[derive(Deserialize)]
pub struct SabrParameterSurfaceRaw {
    expiries: Vec<f64>,
    tenors: Vec<f64>,
    alpha: Vec<Vec<f64>>,
    beta: f64,
    rho: Vec<Vec<f64>>,
    nu: Vec<Vec<f64>>,
}

impl TryFrom<SabrParameterSurfaceRaw> for SabrParameterSurface {
    type Error = ModelError;

    fn try_from(raw: SabrParameterSurfaceRaw) -> Result<Self, Self::Error> {
        SabrParameterSurface::new(raw.expiries, raw.tenors, raw.alpha, raw.beta, raw.rho, raw.nu)
    }
}

#[derive(Deserialize)]
pub struct HullWhiteParametersRaw {
    mean_reversion: f64,
    volatility: Vec<f64>,
    volatility_time: Vec<f64>,
}

impl TryFrom<HullWhiteParametersRaw> for HullWhiteParameters {
    type Error = ModelError;

    fn try_from(raw: HullWhiteParametersRaw) -> Result<Self, Self::Error> {
        HullWhiteParameters::new(raw.mean_reversion, raw.volatility, raw.volatility_time)
    }
}

#[derive(Deserialize)]
pub struct G2ppParametersRaw {
    mean_reversion: [f64; 2],
    volatility: [Vec<f64>; 2],
    volatility_time: Vec<f64>,
    correlation: f64,
}

impl TryFrom<G2ppParametersRaw> for G2ppParameters {
    type Error = ModelError;

    fn try_from(raw: G2ppParametersRaw) -> Result<Self, Self::Error> {
        G2ppParameters::new(
            raw.mean_reversion,
            raw.volatility,
            raw.volatility_time,
            raw.correlation,
        )
    }
}
