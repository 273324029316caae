//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during a search
//! - exported to JSON/CSV
//! - rendered by the CLI and TUI without re-deriving anything

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A billing search request: the target amount and the gold-rate range to
/// scan, in currency units (rates per gram).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub target: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl SearchRequest {
    /// Validating constructor used by the CLI and TUI front-ends.
    pub fn new(target: f64, min_rate: f64, max_rate: f64) -> Result<Self, AppError> {
        let request = Self {
            target,
            min_rate,
            max_rate,
        };
        if !request.is_valid() {
            return Err(AppError::new(
                2,
                format!(
                    "Invalid request: target={target}, min_rate={min_rate}, max_rate={max_rate} \
                     (all must be finite and > 0, with min_rate < max_rate)."
                ),
            ));
        }
        Ok(request)
    }

    /// Re-check used by the search core; an invalid request yields an empty
    /// result there instead of an error.
    pub fn is_valid(&self) -> bool {
        self.target.is_finite()
            && self.target > 0.0
            && self.min_rate.is_finite()
            && self.min_rate > 0.0
            && self.max_rate.is_finite()
            && self.max_rate > 0.0
            && self.min_rate < self.max_rate
    }
}

/// One evaluated (weight, rate) billing candidate.
///
/// Monetary fields carry the display-stable rounding applied at construction
/// time (see `fit::fitter`); `accuracy` stays unrounded. Candidates are
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Ornament weight in grams (3-decimal precision).
    pub weight: f64,
    /// Gold rate per gram (1-decimal precision).
    pub rate: f64,
    /// weight × rate, rounded to 4 decimals.
    pub raw_product: f64,
    /// target − raw product (the GST amount needed), rounded to 4 decimals.
    pub difference: f64,
    /// Half the difference before truncation, rounded to 4 decimals.
    pub half_difference: f64,
    /// Central GST share: floor(half GST × 100) / 100.
    pub cgst: f64,
    /// State GST share, truncated identically to `cgst`.
    pub sgst: f64,
    /// cgst + sgst (may fall slightly short of `difference`).
    pub total_gst: f64,
    /// Adjusted base value whose sum with the GST shares hits the target.
    pub value: f64,
    /// value + cgst + sgst, rounded to 2 decimals.
    pub final_total: f64,
    /// |target − final total| before rounding.
    pub accuracy: f64,
}

impl Candidate {
    /// Identity key for uniqueness filtering: the (weight, rate) pair at
    /// their stored precisions (milligrams, rate tenths).
    pub fn pair_key(&self) -> (i64, i64) {
        (
            (self.weight * 1000.0).round() as i64,
            (self.rate * 10.0).round() as i64,
        )
    }
}

/// A saved search run (JSON export).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsFile {
    pub tool: String,
    pub generated_on: NaiveDate,
    pub request: SearchRequest,
    /// Rate step resolved from the range width.
    pub rate_step: f64,
    pub options: Vec<Candidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_a_well_formed_request() {
        let request = SearchRequest::new(10000.0, 9400.0, 9600.0).unwrap();
        assert!(request.is_valid());
    }

    #[test]
    fn new_rejects_inverted_and_non_positive_ranges() {
        assert!(SearchRequest::new(10000.0, 9600.0, 9400.0).is_err());
        assert!(SearchRequest::new(10000.0, 9400.0, 9400.0).is_err());
        assert!(SearchRequest::new(0.0, 9400.0, 9600.0).is_err());
        assert!(SearchRequest::new(10000.0, -1.0, 9600.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite_values() {
        assert!(SearchRequest::new(f64::NAN, 9400.0, 9600.0).is_err());
        assert!(SearchRequest::new(10000.0, 9400.0, f64::INFINITY).is_err());
    }

    #[test]
    fn invalid_requests_report_exit_code_2() {
        let err = SearchRequest::new(10000.0, 9600.0, 9400.0).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn pair_key_distinguishes_weights_at_milligram_precision() {
        let a = sample(1.022, 9500.0);
        let b = sample(1.023, 9500.0);
        let c = sample(1.022, 9500.1);
        assert_ne!(a.pair_key(), b.pair_key());
        assert_ne!(a.pair_key(), c.pair_key());
        assert_eq!(a.pair_key(), sample(1.022, 9500.0).pair_key());
    }

    fn sample(weight: f64, rate: f64) -> Candidate {
        Candidate {
            weight,
            rate,
            raw_product: weight * rate,
            difference: 0.0,
            half_difference: 0.0,
            cgst: 0.0,
            sgst: 0.0,
            total_gst: 0.0,
            value: 0.0,
            final_total: 0.0,
            accuracy: 0.0,
        }
    }
}
