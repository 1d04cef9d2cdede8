//! Composite Simpson quadrature.

/// Integrates `f` over `[a, b]` with composite Simpson on `n` intervals.
///
/// `n` is rounded up to the next even number and is at least 2. An empty
/// or reversed interval gives the signed integral.
///
/// # Example
///
/// ```
/// use pricer_core::math::integration::simpson;
///
/// let area = simpson(|x| x * x, 0.0, 3.0, 10);
/// assert!((area - 9.0).abs() < 1e-12);
/// ```
pub fn simpson<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    simpson_nodes(a, b, n).into_iter().map(|(x, w)| w * f(x)).sum()
}

/// Abscissas and weights of the composite Simpson rule used by [`simpson`].
///
/// Lets a caller accumulate several integrands that share the same
/// evaluation points in a single pass. An empty interval gives no node.
pub fn simpson_nodes(a: f64, b: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let n = n + n % 2;
    let h = (b - a) / n as f64;
    if h == 0.0 {
        return Vec::new();
    }
    (0..=n)
        .map(|i| {
            let weight = if i == 0 || i == n {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            (a + i as f64 * h, weight * h / 3.0)
        })
        .collect()
}
