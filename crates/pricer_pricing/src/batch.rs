//! Parallel portfolio valuation.
//!
//! Calculators are stateless and market data is read-only, so a portfolio
//! can be valued instrument by instrument on the rayon thread pool. Each
//! instrument keeps its own `Result`: one unsupported trade does not fail
//! the rest of the book.
//!
//! ```
//! use pricer_core::market_data::{CurveBundle, CurveEnum};
//! use pricer_core::types::Currency;
//! use pricer_models::instruments::{rates::Swap, InstrumentDerivative};
//! use pricer_pricing::batch::{present_value_portfolio, BatchConfig};
//! use pricer_pricing::calculators::PresentValueCalculator;
//!
//! let curves = CurveBundle::new()
//!     .with_curve("USD Funding", CurveEnum::flat(0.03))
//!     .with_curve("USD Libor", CurveEnum::flat(0.035));
//! let book: Vec<InstrumentDerivative> = (1..=4)
//!     .map(|years| {
//!         Swap::fixed_ibor(
//!             Currency::USD, 0.0, years as f64, 1, 2, 1e6, 0.03, true, "USD Funding", "USD Libor",
//!         )
//!         .unwrap()
//!         .into()
//!     })
//!     .collect();
//!
//! let config = BatchConfig::default();
//! let results = present_value_portfolio(&book, &PresentValueCalculator, &curves, &config);
//! assert_eq!(results.len(), 4);
//! assert!(results.iter().all(|r| r.is_ok()));
//! ```

use pricer_core::types::{MultiCurrencyAmount, PricingResult};
use pricer_models::instruments::{InstrumentDerivative, InstrumentVisitor};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Parallelisation settings for portfolio valuation.
#[derive(Clone, Copy, Debug)]
pub struct BatchConfig {
    /// Minimum instruments per thread before the thread pool is used.
    pub min_instruments_per_thread: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_instruments_per_thread: 4,
        }
    }
}

impl BatchConfig {
    /// Configuration with the given threshold.
    #[inline]
    pub fn with_min_instruments(min_instruments_per_thread: usize) -> Self {
        Self {
            min_instruments_per_thread,
        }
    }

    /// Whether a portfolio of `n` instruments is worth parallelising.
    #[inline]
    pub fn should_parallelise(&self, n: usize) -> bool {
        n >= self.min_instruments_per_thread.saturating_mul(rayon::current_num_threads())
    }
}

/// Applies `visitor` to every instrument, in portfolio order.
pub fn evaluate_portfolio<V, M>(
    portfolio: &[InstrumentDerivative],
    visitor: &V,
    market: &M,
    config: &BatchConfig,
) -> Vec<PricingResult<V::Output>>
where
    V: InstrumentVisitor<M> + Sync,
    V::Output: Send,
    M: Sync + ?Sized,
{
    debug!(
        instruments = portfolio.len(),
        calculation = visitor.calculation(),
        "portfolio evaluation"
    );
    if !config.should_parallelise(portfolio.len()) {
        return portfolio.iter().map(|i| i.accept(visitor, market)).collect();
    }
    portfolio.par_iter().map(|i| i.accept(visitor, market)).collect()
}

/// Present value of every instrument of a portfolio.
pub fn present_value_portfolio<V, M>(
    portfolio: &[InstrumentDerivative],
    calculator: &V,
    market: &M,
    config: &BatchConfig,
) -> Vec<PricingResult<MultiCurrencyAmount>>
where
    V: InstrumentVisitor<M, Output = MultiCurrencyAmount> + Sync,
    M: Sync + ?Sized,
{
    evaluate_portfolio(portfolio, calculator, market, config)
}

/// Sum of the successful present values, with the number of failures.
pub fn total_present_value(
    results: &[PricingResult<MultiCurrencyAmount>]) -> (MultiCurrencyAmount, usize,
) {
    let mut failures = 0;
    let total = results
        .iter()
        .fold(MultiCurrencyAmount::new(), |acc, result| match result {
            Ok(pv) => acc.plus_all(pv),
            Err(err) => {
                warn!(error = %err, "instrument left out of portfolio total");
                failures += 1;
                acc
            }
        });
    (total, failures)
}
