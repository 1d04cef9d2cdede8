//! Numerical foundations.
//!
//! - [`distributions`]: standard normal CDF, density and quantile
//! - [`solvers`]: bracketing root finder
//! - [`integration`]: composite Simpson quadrature

pub mod distributions;
pub mod integration;
pub mod solvers;
