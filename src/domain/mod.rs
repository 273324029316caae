//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated search request (`SearchRequest`)
//! - evaluated billing candidates (`Candidate`)
//! - the export schema (`OptionsFile`)

pub mod types;

pub use types::*;
