//! Integration tests for instrument construction and model formulas.

use approx::assert_relative_eq;
use pricer_core::types::Currency;
use pricer_models::analytical::Black;
use pricer_models::instruments::fx::{Forex, ForexOptionDigital};
use pricer_models::instruments::rates::{PaymentFixed, Swap, SwaptionCash};
use pricer_models::instruments::InstrumentDerivative;
use pricer_models::models::{SabrExtrapolationRight, SabrParameterSurface, SabrParameters};

// ==========================================================
// Instruments
// ==========================================================

#[test]
fn test_swaption_from_builder_swap() {
    let swap = Swap::fixed_ibor(
        Currency::USD, 5.0, 10.0, 2, 4, 1e8, 0.04, true, "USD Funding", "USD Libor3M",
    )
    .unwrap();
    let swaption = SwaptionCash::new(swap, 5.0, 5.0, false).unwrap();
    let instrument = InstrumentDerivative::from(swaption.clone());
    assert_eq!(instrument.kind(), "SwaptionCash");
    assert_relative_eq!(swaption.tenor(), 10.0, epsilon = 1e-12);
    assert_eq!(swaption.underlying().first_leg().len(), 20);
}

#[cfg(feature = "serde")]
#[test]
fn test_instrument_serde_round_trip() {
    let forex = Forex::new(
        PaymentFixed::new(Currency::EUR, 0.75, 1e8, "EUR Discounting").unwrap(),
        PaymentFixed::new(Currency::USD, 0.75, -1.45e8, "USD Discounting").unwrap(),
    )
    .unwrap();
    let digital = ForexOptionDigital::new(forex, 0.7, true, true, true).unwrap();
    let instrument = InstrumentDerivative::from(digital);
    let json = serde_json::to_string(&instrument).unwrap();
    let back: InstrumentDerivative = serde_json::from_str(&json).unwrap();
    assert_eq!(instrument, back);
}

// ==========================================================
// SABR
// ==========================================================

#[test]
fn test_surface_and_extrapolation_agree_below_cutoff() {
    let params = SabrParameters::new(0.05, 0.5, -0.25, 0.5).unwrap();
    let surface = SabrParameterSurface::constant(params);
    let at_node = surface.parameters(7.0, 12.0).unwrap();
    assert_eq!(at_node, params);

    let pricer = SabrExtrapolationRight::new(0.04, at_node, 7.0, 0.08, 10.0).unwrap();
    let vol = params.volatility(0.04, 0.05, 7.0).unwrap();
    let black = Black::new(0.04, vol).unwrap().price(0.05, 7.0, false);
    assert_relative_eq!(pricer.price(0.05, false).unwrap(), black, epsilon = 1e-15);
}
