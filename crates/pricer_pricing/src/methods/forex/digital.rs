//! Digital FX options under Black with a delta smile.
//!
//! A domestic payout pays `|A₂|` of `ccy2` when the option ends in the
//! money: `PV = ±|A₂|·P_dom·Φ(ω·d₂)`. A foreign payout pays `|A₁|` of
//! `ccy1` and is the domestic digital of the inverted pair, which reduces
//! to `PV = ±|A₁|·P_for·Φ(ω·d₁)` in `ccy1`.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::sensitivity::MultiCurrencyCurveSensitivity;
use pricer_core::types::{CurrencyAmount, MultiCurrencyAmount, PricingError, PricingResult};
use pricer_models::instruments::fx::ForexOptionDigital;
use tracing::debug;

use super::{
    discount_nodes, market, node_sensitivity, volatility_adjoint, ForexMarket,
    ForexVolatilityNodeSensitivity, ForexVolatilitySensitivity,
};
use crate::context::ForexSmileDataBundle;

struct Valuation {
    market: ForexMarket,
    /// `±|A|` of the payout currency
    factor: f64,
    omega: f64,
    d1: f64,
    d2: f64,
    /// `σ·√T`
    std_dev: f64,
}

fn valuation(
    option: &ForexOptionDigital,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<Valuation> {
    let forex = option.underlying();
    debug!(
        strike = option.strike(),
        expiry = option.expiry_time(),
        domestic = option.payout_domestic(),
        "forex digital"
    );
    let market = market(forex, option.expiry_time(), bundle)?;
    let std_dev = market.volatility * option.expiry_time().sqrt();
    if !(std_dev > 0.0) {
        return Err(PricingError::InvalidInput(
            "digital option needs a positive standard deviation".to_string(),
        ));
    }
    let d1 = (market.forward / option.strike()).ln() / std_dev + 0.5 * std_dev;
    let d2 = d1 - std_dev;
    let amount = if option.payout_domestic() {
        forex.payment_currency2().amount()
    } else {
        forex.payment_currency1().amount()
    };
    let sign = if option.is_long() { 1.0 } else { -1.0 };
    Ok(Valuation {
        market,
        factor: sign * amount.abs(),
        omega: if option.is_call() { 1.0 } else { -1.0 },
        d1,
        d2,
        std_dev,
    })
}

impl Valuation {
    /// Value in the payout currency.
    fn value(&self, domestic: bool) -> f64 {
        if domestic {
            self.factor * self.market.df_domestic * norm_cdf(self.omega * self.d2)
        } else {
            self.factor * self.market.df_foreign * norm_cdf(self.omega * self.d1)
        }
    }

    /// Derivative of [`Valuation::value`] with respect to the spot.
    fn spot_derivative(&self, domestic: bool) -> f64 {
        let m = &self.market;
        if domestic {
            self.factor * m.df_domestic * self.omega * norm_pdf(self.d2) / (m.spot * self.std_dev)
        } else {
            self.factor * m.df_foreign * self.omega * norm_pdf(self.d1) / (m.spot * self.std_dev)
        }
    }
}

/// Present value in the payout currency.
pub fn present_value(
    option: &ForexOptionDigital,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<MultiCurrencyAmount> {
    let v = valuation(option, bundle)?;
    Ok(MultiCurrencyAmount::of(
        option.payout_currency(),
        v.value(option.payout_domestic()),
    ))
}

/// Exposure to both currencies of the pair.
///
/// For a domestic payout this is the foreign delta and `PV − delta·S`.
/// A foreign payout is first expressed in `ccy2` as `PV·S`, whose spot
/// derivative gives the `ccy1` exposure.
pub fn currency_exposure(
    option: &ForexOptionDigital,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<MultiCurrencyAmount> {
    let v = valuation(option, bundle)?;
    let forex = option.underlying();
    let spot = v.market.spot;
    let domestic = option.payout_domestic();
    let pv = v.value(domestic);
    let dv_ds = v.spot_derivative(domestic);
    let (ccy1, ccy2) = if domestic {
        (dv_ds, pv - dv_ds * spot)
    } else {
        (pv + spot * dv_ds, -dv_ds * spot * spot)
    };
    Ok(MultiCurrencyAmount::of(forex.currency1(), ccy1)
        .plus(CurrencyAmount::new(forex.currency2(), ccy2)))
}

/// Sensitivity to both discounting curves, in the payout currency.
pub fn present_value_curve_sensitivity(
    option: &ForexOptionDigital,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<MultiCurrencyCurveSensitivity> {
    let v = valuation(option, bundle)?;
    let m = &v.market;
    let (df_foreign_bar, df_domestic_bar) = if option.payout_domestic() {
        let density = v.omega * norm_pdf(v.d2) / v.std_dev;
        (
            v.factor * m.df_domestic * density / m.df_foreign,
            v.factor * (norm_cdf(v.omega * v.d2) - density),
        )
    } else {
        let density = v.omega * norm_pdf(v.d1) / v.std_dev;
        (
            v.factor * (norm_cdf(v.omega * v.d1) + density),
            -v.factor * m.df_foreign * density / m.df_domestic,
        )
    };
    Ok(MultiCurrencyCurveSensitivity::of(
        option.payout_currency(),
        discount_nodes(option.underlying(), m, df_foreign_bar, df_domestic_bar),
    ))
}

fn vega(v: &Valuation, domestic: bool) -> f64 {
    let volatility = v.market.volatility;
    if domestic {
        // ∂d₂/∂σ = −d₁/σ
        v.factor * v.market.df_domestic * v.omega * norm_pdf(v.d2) * (-v.d1 / volatility)
    } else {
        // ∂d₁/∂σ = −d₂/σ
        v.factor * v.market.df_foreign * v.omega * norm_pdf(v.d1) * (-v.d2 / volatility)
    }
}

/// Vega at `(expiry, strike)`, in the payout currency.
pub fn present_value_volatility_sensitivity(
    option: &ForexOptionDigital,
    bundle: &ForexSmileDataBundle,
) -> PricingResult<ForexVolatilitySensitivity> {
    let v = valuation(option, bundle)?;
    Ok(ForexVolatilitySensitivity::of(
        bundle.currency_pair(),
        option.payout_currency(),
        option.expiry_time(),
        option.strike(),
        vega(&v, option.payout_domestic()),
    ))
}

/// Vega distributed over the smile nodes.
pub fn present_value_volatility_node_sensitivity(
    option: &ForexOptionDigital,
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
        option.payout_currency(),
        vega(&v, option.payout_domestic()),
        &adjoint,
    ))
}
