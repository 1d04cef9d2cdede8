//! Cash-flow equivalents of a fixed/ibor swap.
//!
//! In a Gaussian rates model every ibor coupon can be replaced by fixed
//! flows that have the same value in every state: the coupon
//! `N·τ_p·(F + s)` paid at `t_p` equals a flow of
//! `A·P_f(t_s)·P_d(t_p)/(P_f(t_e)·P_d(t_s))` at `t_s` minus `A` at `t_p`,
//! plus the spread, with `A = N·τ_p/τ_f`. The swap then becomes a list of
//! known amounts at known times.

use pricer_core::market_data::CurveBundle;
use pricer_core::math::distributions::norm_cdf;
use pricer_core::math::solvers::BrentSolver;
use pricer_core::sensitivity::CurveSensitivity;
use pricer_core::types::{PricingError, PricingResult};
use pricer_models::instruments::rates::{Annuity, Payment, Swap};
use tracing::trace;

use crate::methods::discounting::discount_factor;

#[derive(Debug, Clone, PartialEq)]
enum Origin {
    /// Known amount discounted on `funding`.
    Fixed { funding: String },
    /// Start of an ibor fixing period, paid at `payment`.
    IborStart {
        funding: String,
        forward: String,
        end: f64,
        payment: f64,
    },
}

/// One equivalent flow with its discount factor.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowEquivalent {
    time: f64,
    amount: f64,
    discount_factor: f64,
    origin: Origin,
}

impl CashFlowEquivalent {
    /// Payment time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Amount paid at [`time`](Self::time).
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Funding discount factor at [`time`](Self::time).
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// `amount · discount factor`.
    pub fn discounted(&self) -> f64 {
        self.amount * self.discount_factor
    }

    /// Known `amount` at `time`, discounted on `funding`.
    pub(crate) fn fixed(
        curves: &CurveBundle,
        funding: &str,
        time: f64,
        amount: f64,
    ) -> PricingResult<Self> {
        Ok(Self {
            time,
            amount,
            discount_factor: discount_factor(curves, funding, time)?,
            origin: Origin::Fixed {
                funding: funding.to_string(),
            },
        })
    }

    /// Adds `weight · ∂(amount·P)/∂r` to `sensitivity`, where `weight` is
    /// the derivative of a price with respect to the discounted amount.
    pub fn add_sensitivity(&self, sensitivity: &mut CurveSensitivity, weight: f64) {
        let value = weight * self.discounted();
        match &self.origin {
            Origin::Fixed { funding } => {
                sensitivity.add(funding.as_str(), self.time, -self.time * value)
            }
            Origin::IborStart {
                funding,
                forward,
                end,
                payment,
            } => {
                // amount·P_d(t_s) = A·P_f(t_s)/P_f(t_e)·P_d(t_p)
                sensitivity.add(forward.as_str(), self.time, -self.time * value);
                sensitivity.add(forward.as_str(), *end, end * value);
                sensitivity.add(funding.as_str(), *payment, -payment * value);
            }
        }
    }
}


/// Equivalent flows of one leg, in payment order.
///
/// # Errors
/// `PricingError::InvalidInput` for legs holding FRAs.
pub fn leg_cash_flow_equivalents(
    leg: &Annuity,
    curves: &CurveBundle,
) -> PricingResult<Vec<CashFlowEquivalent>> {
    let mut flows = Vec::with_capacity(2 * leg.len());
    for payment in leg.payments() {
        match payment {
            Payment::Fixed(p) => flows.push(CashFlowEquivalent::fixed(
                curves,
                p.funding_curve(),
                p.payment_time(),
                p.amount(),
            )?),
            Payment::CouponFixed(c) => flows.push(CashFlowEquivalent::fixed(
                curves,
                c.funding_curve(),
                c.payment_time(),
                c.amount(),
            )?),
            Payment::CouponIbor(c) => {
                let start = c.fixing_period_start_time();
                let end = c.fixing_period_end_time();
                let pay = c.payment_time();
                let beta = c.notional() * c.payment_year_fraction() / c.fixing_year_fraction();
                let df_forward_start = discount_factor(curves, c.forward_curve(), start)?;
                let df_forward_end = discount_factor(curves, c.forward_curve(), end)?;
                let df_start = discount_factor(curves, c.funding_curve(), start)?;
                let df_pay = discount_factor(curves, c.funding_curve(), pay)?;
                flows.push(CashFlowEquivalent {
                    time: start,
                    amount: beta * df_forward_start * df_pay / (df_forward_end * df_start),
                    discount_factor: df_start,
                    origin: Origin::IborStart {
                        funding: c.funding_curve().to_string(),
                        forward: c.forward_curve().to_string(),
                        end,
                        payment: pay,
                    },
                });
                let spread = c.notional() * c.payment_year_fraction() * c.spread();
                let amount = spread - beta;
                flows.push(CashFlowEquivalent::fixed(curves, c.funding_curve(), pay, amount)?);
            }
            Payment::ForwardRateAgreement(_) => {
                return Err(PricingError::InvalidInput(
                    "swaption legs cannot hold forward rate agreements".to_string(),
                ))
            }
        }
    }
    Ok(flows)
}

/// Equivalent flows of both legs, first leg first.
pub fn cash_flow_equivalents(
    swap: &Swap,
    curves: &CurveBundle,
) -> PricingResult<Vec<CashFlowEquivalent>> {
    let mut flows = leg_cash_flow_equivalents(swap.first_leg(), curves)?;
    flows.extend(leg_cash_flow_equivalents(swap.second_leg(), curves)?);
    Ok(flows)
}

/// Exercise value `E[(Σ aᵢ·exp(−αᵢX − αᵢ²/2))⁺]` for `X ~ N(0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Exercise {
    pub value: f64,
    /// `∂value/∂aᵢ`
    pub weights: Vec<f64>,
    /// Exercise boundary, `None` when the sum never changes sign.
    pub boundary: Option<f64>,
}

/// Explicit decomposition over a single Gaussian factor.
///
/// The sum is monotone in `X` whenever the `aᵢ` change sign once along
/// increasing `αᵢ`, so the exercise region is a half line cut at the root
/// `κ`. Without a root the sum keeps the sign it has at zero.
pub(crate) fn jamshidian(amounts: &[f64], alphas: &[f64], solver: &BrentSolver) -> Exercise {
    let f = |x: f64| -> f64 {
        amounts
            .iter()
            .zip(alphas)
            .map(|(a, alpha)| a * (-alpha * x - 0.5 * alpha * alpha).exp())
            .sum()
    };
    match solver.find_root_expanding(f, 0.0, 1.0) {
        Ok(kappa) => {
            let slope: f64 = amounts
                .iter()
                .zip(alphas)
                .map(|(a, alpha)| -alpha * a * (-alpha * kappa - 0.5 * alpha * alpha).exp())
                .sum();
            let omega = if slope > 0.0 { -1.0 } else { 1.0 };
            trace!(kappa, omega, "exercise boundary");
            let weights: Vec<f64> =
                alphas.iter().map(|alpha| norm_cdf(omega * (kappa + alpha))).collect();
            let value = amounts.iter().zip(&weights).map(|(a, w)| a * w).sum();
            Exercise {
                value,
                weights,
                boundary: Some(kappa),
            }
        }
        Err(_) => {
            let weight = if f(0.0) > 0.0 { 1.0 } else { 0.0 };
            let total: f64 = amounts.iter().sum();
            Exercise {
                value: weight * total,
                weights: vec![weight; amounts.len()],
                boundary: None,
            }
        }
    }
}

/// `+1` for a long position, `−1` for a short one.
#[inline]
pub(crate) fn position_sign(is_long: bool) -> f64 {
    if is_long {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::discounting::swap;
    use crate::methods::discounting::test_support::{curves, node_fd, FORWARD, FUNDING};
    use approx::assert_relative_eq;
    use pricer_core::types::Currency;

    fn underlying() -> Swap {
        Swap::fixed_ibor(Currency::USD, 2.0, 3.0, 1, 2, 1e6, 0.03, true, FUNDING, FORWARD).unwrap()
    }

    #[test]
    fn test_equivalents_reprice_the_swap() {
        let curves = curves();
        let s = underlying();
        let flows = cash_flow_equivalents(&s, &curves).unwrap();
        assert_eq!(flows.len(), 3 + 2 * 6);
        let total: f64 = flows.iter().map(CashFlowEquivalent::discounted).sum();
        let pv = swap::present_value(&s, &curves).unwrap().amount();
        assert_relative_eq!(total, pv, epsilon = 1e-6);
    }

    #[test]
    fn test_sensitivity_matches_swap_sensitivity() {
        let curves = curves();
        let s = underlying();
        let flows = cash_flow_equivalents(&s, &curves).unwrap();
        let mut sensitivity = CurveSensitivity::new();
        for flow in &flows {
            flow.add_sensitivity(&mut sensitivity, 1.0);
        }
        let direct = swap::present_value_curve_sensitivity(&s, &curves).unwrap();
        assert!(sensitivity.approx_eq(&direct, 1e-6));
        for (time, value) in sensitivity.to_pairs(FORWARD) {
            let fd = node_fd(&curves, FORWARD, time, |c| {
                cash_flow_equivalents(&s, c).unwrap().iter().map(|f| f.discounted()).sum()
            });
            assert_relative_eq!(value, fd, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_jamshidian_single_flow_is_lognormal_call() {
        // E[(e^{−αX−α²/2} − K)⁺] is Black with forward 1 and total variance α².
        let solver = BrentSolver::default();
        let (alpha, strike) = (0.2_f64, 0.9_f64);
        let exercise = jamshidian(&[1.0, -strike], &[-alpha, 0.0], &solver);
        let d1 = (1.0 / strike).ln() / alpha + 0.5 * alpha;
        let expected = norm_cdf(d1) - strike * norm_cdf(d1 - alpha);
        assert_relative_eq!(exercise.value, expected, max_relative = 1e-10);
        assert!(exercise.boundary.is_some());
    }

    #[test]
    fn test_jamshidian_parity_and_flat_fallback() {
        let solver = BrentSolver::default();
        let amounts = [1.05, -0.3, -0.8];
        let alphas = [0.0, 0.05, 0.1];
        let negated: Vec<f64> = amounts.iter().map(|a| -a).collect();
        let payer = jamshidian(&amounts, &alphas, &solver);
        let receiver = jamshidian(&negated, &alphas, &solver);
        let total: f64 = amounts.iter().sum();
        assert_relative_eq!(payer.value - receiver.value, total, epsilon = 1e-14);

        let flat = jamshidian(&amounts, &[0.0; 3], &solver);
        assert!(flat.boundary.is_none());
        assert_eq!(flat.value, 0.0);
        let flat_receiver = jamshidian(&negated, &[0.0; 3], &solver);
        assert_relative_eq!(flat_receiver.value, 0.05, epsilon = 1e-14);
        assert_eq!(flat_receiver.weights, vec![1.0; 3]);
    }
}
