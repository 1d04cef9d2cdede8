//! Vanilla FX options under Black with a delta smile.
//!
//! `PV = ±|N₁|·P_dom·Black(F, K, σ, T)`, expressed in the domestic
//! currency `ccy2`. Curve sensitivities keep the volatility frozen.

use pricer_core::sensitivity::{CurveSensitivity, MultiCurrencyCurveSensitivity};
use pricer_core::types::{CurrencyAmount, MultiCurrencyAmount, PricingResult};
use pricer_models::analytical::{Black, BlackPriceAdjoint};
use pricer_models::instruments::fx::ForexOptionVanilla;
use tracing::debug;

use super::{
    discount_nodes, market, node_sensitivity, volatility_adjoint, ForexMarket,
    ForexVolatilityNodeSensitivity, ForexVolatilitySensitivity,
};
use crate::context::ForexSmileDataBundle;

struct Valuation {
    market: ForexMarket,
    black: BlackPriceAdjoint,
    /// `±|N₁|`
    factor: f64,
}

fn valuation(
    option: &ForexOptionVanilla,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<Valuation> {
    let forex = option.underlying();
    debug!(
        pair = %format!("{}/{}", forex.currency1(), forex.currency2()),
        strike = option.strike(),
        expiry = option.expiry_time(),
        "forex vanilla"
    );
    let market = market(forex, option.expiry_time(), bundle)?;
    let black = Black::new(market.forward, market.volatility)?.price_adjoint(
        option.strike(),
        option.expiry_time(),
        option.is_call(),
    );
    let sign = if option.is_long() { 1.0 } else { -1.0 };
    Ok(Valuation {
        market,
        black,
        factor: sign * forex.payment_currency1().amount().abs(),
    })
}

/// Present value in the domestic currency.
pub fn present_value(
    option: &ForexOptionVanilla,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<MultiCurrencyAmount> {
    let v = valuation(option, bundle)?;
    let pv = v.factor * v.market.df_domestic * v.black.price;
    Ok(MultiCurrencyAmount::of(option.underlying().currency2(), pv))
}

/// Foreign delta and the domestic residual `PV − delta·S`.
pub fn currency_exposure(
    option: &ForexOptionVanilla,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<MultiCurrencyAmount> {
    let v = valuation(option, bundle)?;
    let forex = option.underlying();
    let pv = v.factor * v.market.df_domestic * v.black.price;
    let delta = v.factor * v.black.forward * v.market.df_foreign;
    Ok(MultiCurrencyAmount::of(forex.currency1(), delta)
        .plus(CurrencyAmount::new(forex.currency2(), pv - delta * v.market.spot)))
}

/// Sensitivity to both discounting curves, in the domestic currency.
pub fn present_value_curve_sensitivity(
    option: &ForexOptionVanilla,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<MultiCurrencyCurveSensitivity> {
    let v = valuation(option, bundle)?;
    let m = &v.market;
    let df_domestic_bar = v.factor * (v.black.price - m.forward * v.black.forward);
    let df_foreign_bar = v.factor * m.df_domestic * v.black.forward * m.forward / m.df_foreign;
    let sensitivity: CurveSensitivity =
        discount_nodes(option.underlying(), m, df_foreign_bar, df_domestic_bar);
    Ok(MultiCurrencyCurveSensitivity::of(
        option.underlying().currency2(),
        sensitivity,
    ))
}

fn vega(v: &Valuation) -> f64 {
    v.factor * v.market.df_domestic * v.black.volatility
}

/// Vega at `(expiry, strike)`, in the domestic currency.
pub fn present_value_volatility_sensitivity(
    option: &ForexOptionVanilla,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<ForexVolatilitySensitivity> {
    let v = valuation(option, bundle)?;
    Ok(ForexVolatilitySensitivity::of(
        bundle.currency_pair(),
        option.underlying().currency2(),
        option.expiry_time(),
        option.strike(),
        vega(&v),
    ))
}

/// Vega distributed over the smile nodes.
pub fn present_value_volatility_node_sensitivity(
    option: &ForexOptionVanilla,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<ForexVolatilityNodeSensitivity> {
    let v = valuation(option, bundle)?;
    let adjoint = volatility_adjoint(
        option.underlying(),
        option.expiry_time(),
        bundle,
        v.market.forward,
    )?;
    Ok(node_sensitivity(
        bundle,
        option.underlying().currency2(),
        vega(&v),
        &adjoint,
    ))
}
