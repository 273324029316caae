//! Input/output helpers.
//!
//! - run exports to JSON (`export::write_options_json`)
//! - run exports to CSV (`export::write_options_csv`)

pub mod export;

pub use export::*;
