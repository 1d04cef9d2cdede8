//! Forward-mode jets for the SABR tail fit.
//!
//! A [`Jet`] carries a value with its first two strike derivatives, and
//! the derivatives of those three numbers along one input direction (the
//! forward or a SABR parameter). Arithmetic and the few elementary
//! functions used by the Hagan and Black formulas propagate them by the
//! chain rule.

use std::ops::{Add, Div, Mul, Neg, Sub};

use pricer_core::math::distributions::{norm_cdf, norm_pdf};

/// Value with its first and second strike derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Taylor {
    pub value: f64,
    pub d1: f64,
    pub d2: f64,
}

impl Taylor {
    const fn constant(value: f64) -> Self {
        Self {
            value,
            d1: 0.0,
            d2: 0.0,
        }
    }

    fn plus(self, other: Self) -> Self {
        Self {
            value: self.value + other.value,
            d1: self.d1 + other.d1,
            d2: self.d2 + other.d2,
        }
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            d1: self.d1 * factor,
            d2: self.d2 * factor,
        }
    }

    fn times(self, other: Self) -> Self {
        Self {
            value: self.value * other.value,
            d1: self.d1 * other.value + self.value * other.d1,
            d2: self.d2 * other.value + 2.0 * self.d1 * other.d1 + self.value * other.d2,
        }
    }

    /// `g(self)` from `g` and its first two derivatives at the value.
    fn compose(self, g: [f64; 3]) -> Self {
        Self {
            value: g[0],
            d1: g[1] * self.d1,
            d2: g[2] * self.d1 * self.d1 + g[1] * self.d2,
        }
    }
}

/// Strike jet with one tangent direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Jet {
    pub value: Taylor,
    pub tangent: Taylor,
}

impl Jet {
    /// Input that depends on neither the strike nor the direction.
    pub fn constant(value: f64) -> Self {
        Self {
            value: Taylor::constant(value),
            tangent: Taylor::default(),
        }
    }

    /// The strike.
    pub fn strike(value: f64) -> Self {
        Self {
            value: Taylor {
                value,
                d1: 1.0,
                d2: 0.0,
            },
            tangent: Taylor::default(),
        }
    }

    /// Input moved by the direction.
    pub fn seeded(value: f64) -> Self {
        Self {
            value: Taylor::constant(value),
            tangent: Taylor::constant(1.0),
        }
    }

    /// Plain value, for branching.
    pub fn re(&self) -> f64 {
        self.value.value
    }

    /// `g(self)` from `g` and its first three derivatives at the value.
    fn apply(self, g: [f64; 4]) -> Self {
        Self {
            value: self.value.compose([g[0], g[1], g[2]]),
            tangent: self.value.compose([g[1], g[2], g[3]]).times(self.tangent),
        }
    }

    pub fn recip(self) -> Self {
        let r = 1.0 / self.re();
        self.apply([r, -r * r, 2.0 * r * r * r, -6.0 * r * r * r * r])
    }

    pub fn ln(self) -> Self {
        let r = 1.0 / self.re();
        self.apply([self.re().ln(), r, -r * r, 2.0 * r * r * r])
    }

    pub fn ln_1p(self) -> Self {
        let r = 1.0 / (1.0 + self.re());
        self.apply([self.re().ln_1p(), r, -r * r, 2.0 * r * r * r])
    }

    pub fn sqrt(self) -> Self {
        let x = self.re();
        let s = x.sqrt();
        self.apply([s, 0.5 / s, -0.25 / (s * x), 0.375 / (s * x * x)])
    }

    pub fn powf(self, n: f64) -> Self {
        let x = self.re();
        self.apply([
            x.powf(n),
            n * x.powf(n - 1.0),
            n * (n - 1.0) * x.powf(n - 2.0),
            n * (n - 1.0) * (n - 2.0) * x.powf(n - 3.0),
        ])
    }

    pub fn norm_cdf(self) -> Self {
        let x = self.re();
        let density = norm_pdf(x);
        self.apply([norm_cdf(x), density, -x * density, (x * x - 1.0) * density])
    }
}

impl Add for Jet {
    type Output = Jet;

    fn add(self, rhs: Jet) -> Jet {
        Jet {
            value: self.value.plus(rhs.value),
            tangent: self.tangent.plus(rhs.tangent),
        }
    }
}

impl Sub for Jet {
    type Output = Jet;

    fn sub(self, rhs: Jet) -> Jet {
        self + (-rhs)
    }
}

impl Neg for Jet {
    type Output = Jet;

    fn neg(self) -> Jet {
        self * -1.0
    }
}

impl Mul for Jet {
    type Output = Jet;

    fn mul(self, rhs: Jet) -> Jet {
        Jet {
            value: self.value.times(rhs.value),
            tangent: self.value.times(rhs.tangent).plus(self.tangent.times(rhs.value)),
        }
    }
}

impl Div for Jet {
    type Output = Jet;

    fn div(self, rhs: Jet) -> Jet {
        self * rhs.recip()
    }
}

impl Add<f64> for Jet {
    type Output = Jet;

    fn add(self, rhs: f64) -> Jet {
        self + Jet::constant(rhs)
    }
}

impl Sub<f64> for Jet {
    type Output = Jet;

    fn sub(self, rhs: f64) -> Jet {
        self + Jet::constant(-rhs)
    }
}

impl Mul<f64> for Jet {
    type Output = Jet;

    fn mul(self, rhs: f64) -> Jet {
        Jet {
            value: self.value.scaled(rhs),
            tangent: self.tangent.scaled(rhs),
        }
    }
}

impl Div<f64> for Jet {
    type Output = Jet;

    fn div(self, rhs: f64) -> Jet {
        self * rhs.recip()
    }
}

impl Add<Jet> for f64 {
    type Output = Jet;

    fn add(self, rhs: Jet) -> Jet {
        rhs + self
    }
}

impl Sub<Jet> for f64 {
    type Output = Jet;

    fn sub(self, rhs: Jet) -> Jet {
        -rhs + self
    }
}

impl Mul<Jet> for f64 {
    type Output = Jet;

    fn mul(self, rhs: Jet) -> Jet {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_strike_derivatives_of_a_composite() {
        // g(K) = ln(K)·√K, g' = (ln K/2 + 1)/√K, g'' = −ln K/(4K^1.5)
        let k = 1.7_f64;
        let g = Jet::strike(k).ln() * Jet::strike(k).sqrt();
        assert_relative_eq!(g.value.value, k.ln() * k.sqrt(), epsilon = 1e-15);
        assert_relative_eq!(g.value.d1, (0.5 * k.ln() + 1.0) / k.sqrt(), epsilon = 1e-14);
        assert_relative_eq!(g.value.d2, -k.ln() / (4.0 * k.powf(1.5)), epsilon = 1e-14);
    }

    #[test]
    fn test_tangent_of_strike_derivatives() {
        // g(K, p) = p·K³ / (1 + p): ∂p g'' = 6K/(1 + p)²
        let (k, p) = (0.8_f64, 0.3_f64);
        let g = Jet::seeded(p) * Jet::strike(k).powf(3.0) / (1.0 + Jet::seeded(p));
        assert_relative_eq!(g.value.d2, 6.0 * k * p / (1.0 + p), epsilon = 1e-14);
        assert_relative_eq!(g.tangent.value, k.powi(3) / ((1.0 + p) * (1.0 + p)), epsilon = 1e-14);
        assert_relative_eq!(g.tangent.d2, 6.0 * k / ((1.0 + p) * (1.0 + p)), epsilon = 1e-14);
    }

    #[test]
    fn test_norm_cdf_against_finite_differences() {
        let x = 0.37;
        let h = 1e-4;
        let g = |y: f64| (2.0 * Jet::strike(y) - 0.1).norm_cdf().value;
        let (up, mid, down) = (g(x + h), g(x), g(x - h));
        assert_relative_eq!(mid.d1, (up.value - down.value) / (2.0 * h), epsilon = 1e-8);
        assert_relative_eq!(mid.d2, (up.d1 - down.d1) / (2.0 * h), epsilon = 1e-7);
        let curvature = (up.value - 2.0 * mid.value + down.value) / (h * h);
        assert_relative_eq!(mid.d2, curvature, epsilon = 1e-6);
    }

    #[test]
    fn test_ln_1p_and_recip_tangents() {
        let p = 0.25_f64;
        let g = (Jet::seeded(p) * Jet::strike(2.0)).ln_1p().recip();
        // g = 1/ln(1 + 2p) at K = 2
        let l = (1.0 + 2.0 * p).ln();
        assert_relative_eq!(g.re(), 1.0 / l, epsilon = 1e-15);
        assert_relative_eq!(g.tangent.value, -2.0 / ((1.0 + 2.0 * p) * l * l), epsilon = 1e-14);
    }
}
