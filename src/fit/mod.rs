//! The billing search core.
//!
//! Responsibilities:
//!
//! - sample the gold-rate axis with a width-dependent step (`rate_grid`)
//! - sweep weight offsets around each rate's ideal weight and build billing
//!   candidates (`fitter`)
//! - rank candidates with the two-tier comparator and keep the top unique
//!   (weight, rate) pairs (`selection`)

pub mod fitter;
pub mod rate_grid;
pub mod selection;

pub use fitter::*;
pub use rate_grid::*;
pub use selection::*;
