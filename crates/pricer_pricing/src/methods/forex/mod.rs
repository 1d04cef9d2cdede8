//! Black method for FX forwards and options.
//!
//! The forward of a pair `(ccy1, ccy2)` is `F = S·P_for(t_p)/P_dom(t_p)`
//! where `S` is the spot in units of `ccy2` per `ccy1`, the foreign curve
//! discounts the `ccy1` payment and the domestic curve the `ccy2` payment.
//! Volatilities come from the delta smile at `(expiry, strike, forward)`.
//!
//! - [`forward`]: FX forwards, priced by discounting both payments
//! - [`vanilla`]: vanilla options
//! - [`digital`]: digital options with domestic or foreign payout
//! - [`sensitivity`]: vega containers and the quote transform

pub mod digital;
pub mod forward;
pub mod sensitivity;
pub mod vanilla;

use pricer_core::market_data::SmileVolatilityAdjoint;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{Currency, PricingError, PricingResult};
use pricer_models::instruments::fx::Forex;
use tracing::trace;

use crate::context::{CurveProvider, ForexSmileDataBundle};
use crate::methods::discounting::{add_discount_node, discount_factor};

pub use sensitivity::{ForexVolatilityNodeSensitivity, ForexVolatilitySensitivity};

/// Market quantities shared by the option formulas.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForexMarket {
    pub spot: f64,
    pub df_foreign: f64,
    pub df_domestic: f64,
    pub forward: f64,
    pub volatility: f64,
}

/// Checks that `forex` is quoted in the bundle's currency pair.
pub(crate) fn check_pair(forex: &Forex, bundle: &ForexSmileDataBundle) -> PricingResult<()> {
    let pair = (forex.currency1(), forex.currency2());
    if pair != bundle.currency_pair() {
        return Err(PricingError::InvalidInput(format!(
            "option on {}/{} with smile for {}/{}",
            pair.0,
            pair.1,
            bundle.currency_pair().0,
            bundle.currency_pair().1
        )));
    }
    Ok(())
}

/// Spot, discount factors, forward and smile volatility.
pub(crate) fn market(
    forex: &Forex,
    expiry: f64,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<ForexMarket> {
    check_pair(forex, bundle)?;
    let curves = bundle.curves();
    let t = forex.payment_time();
    let spot = bundle.fx_matrix().fx_rate(forex.currency1(), forex.currency2())?;
    let df_foreign = discount_factor(curves, forex.payment_currency1().funding_curve(), t)?;
    let df_domestic = discount_factor(curves, forex.payment_currency2().funding_curve(), t)?;
    let forward = spot * df_foreign / df_domestic;
    let volatility = bundle.smile().volatility(expiry, forex.strike(), forward)?;
    trace!(spot, forward, volatility, "forex market");
    Ok(ForexMarket {
        spot,
        df_foreign,
        df_domestic,
        forward,
        volatility,
    })
}

/// Smile adjoint at the option's point.
pub(crate) fn volatility_adjoint(
    forex: &Forex,
    expiry: f64,
    bundle: &ForexSmileDataBundle,
    forward: f64,
) -> PricingResult<SmileVolatilityAdjoint> {
    Ok(bundle.smile().volatility_adjoint(expiry, forex.strike(), forward)?)
}

/// Turns vega into per-node sensitivities of the bundle's smile.
pub(crate) fn node_sensitivity(
    bundle: &ForexSmileDataBundle,
    currency: Currency,
    vega: f64,
    adjoint: &SmileVolatilityAdjoint,
) -> ForexVolatilityNodeSensitivity {
    let smiles = bundle.smile().smiles();
    let values = adjoint
        .node_sensitivity
        .iter()
        .map(|row| row.iter().map(|d| vega * d).collect())
        .collect();
    ForexVolatilityNodeSensitivity::new(
        bundle.currency_pair(),
        currency,
        smiles.iter().map(|s| s.time()).collect(),
        smiles[0].delta().to_vec(),
        values,
    )
}

/// Curve nodes of the two discount factors given their adjoints.
pub(crate) fn discount_nodes(
    forex: &Forex,
    market: &ForexMarket,
    df_foreign_bar: f64,
    df_domestic_bar: f64,
) -> CurveSensitivity {
    let t = forex.payment_time();
    let mut sensitivity = CurveSensitivity::new();
    add_discount_node(
        &mut sensitivity,
        forex.payment_currency1().funding_curve(),
        t,
        market.df_foreign,
        df_foreign_bar,
    );
    add_discount_node(
        &mut sensitivity,
        forex.payment_currency2().funding_curve(),
        t,
        market.df_domestic,
        df_domestic_bar,
    );
    sensitivity
}

#[cfg(test)]
pub(crate) mod test_support {
    //! EUR/USD market shared by the FX method tests.

    use pricer_core::market_data::{
        CurveBundle, CurveEnum, FxMatrix, SmileDeltaParameters, SmileDeltaTermStructure,
    };
    use pricer_core::types::Currency;
    use pricer_models::instruments::fx::Forex;
    use pricer_models::instruments::rates::PaymentFixed;

    use crate::context::ForexSmileDataBundle;

    pub const EUR_CURVE: &str = "EUR Discounting";
    pub const USD_CURVE: &str = "USD Discounting";
    pub const SPOT: f64 = 1.40;
    pub const PAIR: (Currency, Currency) = (Currency::EUR, Currency::USD);

    pub fn curves() -> CurveBundle {
        let times = vec![0.25, 0.5, 1.0, 2.0, 5.0];
        CurveBundle::new()
            .with_curve(
                EUR_CURVE,
                CurveEnum::interpolated(times.clone(), vec![0.010, 0.012, 0.015, 0.019, 0.024])
                    .unwrap(),
            )
            .with_curve(
                USD_CURVE,
                CurveEnum::interpolated(times, vec![0.020, 0.022, 0.026, 0.030, 0.034]).unwrap(),
            )
            .with_curve_currency(EUR_CURVE, Currency::EUR)
            .with_curve_currency(USD_CURVE, Currency::USD)
    }

    pub fn fx_matrix(spot: f64) -> FxMatrix {
        FxMatrix::new(Currency::USD).with_rate(Currency::EUR, spot).unwrap()
    }

    pub fn smile() -> SmileDeltaTermStructure {
        let delta = vec![0.10, 0.25];
        let quotes = |time: f64, atm: f64, risk_reversal: [f64; 2], strangle: [f64; 2]| {
            SmileDeltaParameters::from_quotes(time, atm, delta.clone(), &risk_reversal, &strangle)
                .unwrap()
        };
        SmileDeltaTermStructure::new(vec![
            quotes(0.25, 0.185, [-0.011, -0.006], [0.0031, 0.0021]),
            quotes(0.5, 0.18, [-0.012, -0.007], [0.0033, 0.0022]),
            quotes(1.0, 0.175, [-0.013, -0.008], [0.0034, 0.0023]),
            quotes(2.0, 0.17, [-0.014, -0.009], [0.0035, 0.0024]),
        ])
        .unwrap()
    }

    pub fn flat_smile(volatility: f64) -> SmileDeltaTermStructure {
        SmileDeltaTermStructure::new(vec![SmileDeltaParameters::from_quotes(
            1.0,
            volatility,
            vec![0.25],
            &[0.0],
            &[0.0],
        )
        .unwrap()])
        .unwrap()
    }

    pub fn bundle() -> ForexSmileDataBundle {
        ForexSmileDataBundle::new(curves(), fx_matrix(SPOT), smile(), PAIR)
    }

    pub fn flat_bundle() -> ForexSmileDataBundle {
        ForexSmileDataBundle::new(curves(), fx_matrix(SPOT), flat_smile(0.18), PAIR)
    }

    /// Receive `notional` EUR against `notional·strike` USD at `time`.
    pub fn forex(notional: f64, strike: f64, time: f64) -> Forex {
        Forex::new(
            PaymentFixed::new(Currency::EUR, time, notional, EUR_CURVE).unwrap(),
            PaymentFixed::new(Currency::USD, time, -notional * strike, USD_CURVE).unwrap(),
        )
        .unwrap()
    }
}
