//! Numeric helpers shared by the fit modules.

pub mod rounding;

pub use rounding::*;
