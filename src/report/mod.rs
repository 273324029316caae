//! Reporting utilities: run summaries, ranked option tables, and receipts.
//!
//! We keep formatting code in one place so:
//! - the search code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;
