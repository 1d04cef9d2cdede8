//! Foreign exchange instruments.
//!
//! - [`Forex`]: exchange of two fixed payments
//! - [`ForexOptionVanilla`] and [`ForexOptionDigital`]: European options on it

mod forex;
mod option;

pub use forex::Forex;
pub use option::{ForexOptionDigital, ForexOptionVanilla};
