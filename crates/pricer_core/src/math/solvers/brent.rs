//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrentSolver {
    config: SolverConfig,
}

impl BrentSolver {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// # Errors
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::NonFinite` - `f` returned NaN or infinity
    /// * `SolverError::MaxIterationsExceeded` - failed to converge
    pub fn find_root<F>(&self, f: F, a: f64, b: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = finite(a, f(a))?;
        let mut fb = finite(b, f(b))?;

        if fa == 0.0 {
            return Ok(a);
        }
        if fa * fb > 0.0 {
            return Err(SolverError::NoBracket { a, b });
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;
        let tol = self.config.tolerance;

        for _ in 0..self.config.max_iterations {
            if fb.abs() < tol {
                return Ok(b);
            }
            let m = 0.5 * (c - b);
            if m.abs() <= tol {
                return Ok(b);
            }

            let mut use_bisection = true;
            if e.abs() >= tol && fa != fb {
                let (p, q) = if fa != fc && fb != fc {
                    // inverse quadratic
                    let r = fb / fc;
                    let s = fb / fa;
                    let t = fa / fc;
                    (
                        s * (t * (r - t) * (c - b) - (1.0 - r) * (b - a)),
                        (t - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                } else {
                    // secant
                    let s = fb / fa;
                    (2.0 * m * s, 1.0 - s)
                };
                if p.abs() < (1.5 * m * q).abs() && p.abs() < (0.5 * e * q).abs() {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                }
            }
            if use_bisection {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(m) };
            fb = finite(b, f(b))?;

            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Find a root of a function of unknown bracket.
    ///
    /// Starting from `[x0 - step, x0 + step]`, the bracket is doubled
    /// outward on the side with the smaller `|f|` until the signs differ,
    /// then [`find_root`](Self::find_root) is applied.
    ///
    /// # Errors
    /// `SolverError::NoBracket` when no sign change is found within the
    /// iteration limit.
    pub fn find_root_expanding<F>(&self, f: F, x0: f64, step: f64) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        let step = if step > 0.0 { step } else { 1.0 };
        let mut lo = x0 - step;
        let mut hi = x0 + step;
        let mut f_lo = finite(lo, f(lo))?;
        let mut f_hi = finite(hi, f(hi))?;
        for _ in 0..self.config.max_iterations {
            if f_lo * f_hi <= 0.0 {
                return self.find_root(&f, lo, hi);
            }
            let width = hi - lo;
            if f_lo.abs() < f_hi.abs() {
                lo -= width;
                f_lo = finite(lo, f(lo))?;
            } else {
                hi += width;
                f_hi = finite(hi, f(hi))?;
            }
        }
        Err(SolverError::NoBracket { a: lo, b: hi })
    }
}

#[inline]
fn finite(x: f64, fx: f64) -> Result<f64, SolverError> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(SolverError::NonFinite { x })
    }
}
