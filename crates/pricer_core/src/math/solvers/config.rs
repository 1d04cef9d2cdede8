//! Solver configuration types.

/// Configuration for root-finding algorithms.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// let custom = SolverConfig::new(1e-14, 500);
/// assert_eq!(custom.max_iterations, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence tolerance on both `|f(x)|` and the bracket half-width.
    pub tolerance: f64,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    /// Default values: tolerance 1e-12, 200 iterations.
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration.
    ///
    /// Non-positive tolerances and a zero iteration count fall back to the
    /// defaults.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        let default = Self::default();
        Self {
            tolerance: if tolerance > 0.0 {
                tolerance
            } else {
                default.tolerance
            },
            max_iterations: if max_iterations > 0 {
                max_iterations
            } else {
                default.max_iterations
            },
        }
    }
}
