//! Deserialization shapes of curves and smiles.
//!
//! Decoded market data goes through the same constructors as built data.

use serde::Deserialize;

use super::curves::InterpolatedCurve;
use super::error::MarketDataError;
use super::surfaces::{SmileDeltaParameters, SmileDeltaTermStructure};

#[derive(Deserialize)]
pub struct InterpolatedCurveRaw {
    times: Vec<f64>,
    rates: Vec<f64>,
}

impl TryFrom<InterpolatedCurveRaw> for InterpolatedCurve {
    type Error = MarketDataError;

    fn try_from(raw: InterpolatedCurveRaw) -> Result<Self, Self::Error> {
        InterpolatedCurve::new(raw.times, raw.rates)
    }
}

#[derive(Deserialize)]
pub struct SmileDeltaParametersRaw {
    time: f64,
    delta: Vec<f64>,
    volatility: Vec<f64>,
}

impl TryFrom<SmileDeltaParametersRaw> for SmileDeltaParameters {
    type Error = MarketDataError;

    fn try_from(raw: SmileDeltaParametersRaw) -> Result<Self, Self::Error> {
        SmileDeltaParameters::new(raw.time, raw.delta, raw.volatility)
    }
}

#[derive(Deserialize)]
pub struct SmileDeltaTermStructureRaw {
    smiles: Vec<SmileDeltaParameters>,
}

impl TryFrom<SmileDeltaTermStructureRaw> for SmileDeltaTermStructure {
    type Error = MarketDataError;

    fn try_from(raw: SmileDeltaTermStructureRaw) -> Result<Self, Self::Error> {
        SmileDeltaTermStructure::new(raw.smiles)
    }
}
