//! The candidate search.
//!
//! Given a target bill amount and a sampled gold rate, the weight that bills
//! exactly to the target satisfies `weight × rate × 1.03 = target`. The
//! search walks the rate grid, sweeps small weight offsets around that ideal
//! weight, and keeps the (weight, rate) pairs whose billed total reconciles
//! to the target:
//!
//! - the raw product plus 3% GST must land within one currency unit of the
//!   target (admission window)
//! - the needed GST is split into CGST/SGST by truncating half of it to 2
//!   decimals; both shares truncate identically, so the split may fall
//!   slightly short of the exact need
//! - the base value is truncated to 1 decimal and its second decimal digit
//!   re-chosen so value + CGST + SGST lands as close to the target as the
//!   digit grid allows

use rayon::prelude::*;

use crate::domain::{Candidate, SearchRequest};
use crate::fit::rate_grid::rate_grid;
use crate::fit::selection::{MAX_RESULTS, rank_and_dedup};
use crate::math::{round_dp, trunc_dp};

/// Total GST rate applied on top of the raw product.
pub const GST_RATE: f64 = 0.03;
/// Multiplier form of `GST_RATE`.
pub const GST_MULTIPLIER: f64 = 1.0 + GST_RATE;
/// Lower bound on plausible ornament weight, in grams.
pub const WEIGHT_MIN: f64 = 0.05;
/// Upper bound on plausible ornament weight, in grams.
pub const WEIGHT_MAX: f64 = 10.0;
/// Admission window (currency units) around the target for raw × 1.03.
pub const ADMISSION_WINDOW: f64 = 1.0;
/// Largest weight offset swept around the ideal weight, in grams.
pub const WEIGHT_OFFSET_MAX: f64 = 0.02;
/// Offset sweep step, in grams.
pub const WEIGHT_OFFSET_STEP: f64 = 0.001;
/// A candidate is kept only when |target − final total| stays within this.
pub const ACCURACY_LIMIT: f64 = 0.01;

/// Search for billing candidates.
///
/// Returns the ranked, deduplicated list (0..=10 items). An empty list is a
/// normal outcome: no (weight, rate) pair reconciles to the target within
/// the accuracy limit. Invalid requests (non-finite values, inverted or
/// non-positive ranges, oversized grids) also yield an empty list rather
/// than an error.
pub fn find_candidates(request: &SearchRequest) -> Vec<Candidate> {
    if !request.is_valid() {
        return Vec::new();
    }
    let Ok(rates) = rate_grid(request.min_rate, request.max_rate) else {
        return Vec::new();
    };

    let target = request.target;

    // Each sampled rate is independent; collect preserves grid order, so the
    // pool (and therefore ranking ties) stays deterministic.
    let per_rate: Vec<Vec<Candidate>> = rates
        .par_iter()
        .map(|&rate| evaluate_rate(target, rate))
        .collect();
    let pool: Vec<Candidate> = per_rate.into_iter().flatten().collect();

    rank_and_dedup(pool, target, MAX_RESULTS)
}

/// Sweep the weight offsets around one sampled rate's ideal weight.
fn evaluate_rate(target: f64, rate: f64) -> Vec<Candidate> {
    let ideal_weight = target / (rate * GST_MULTIPLIER);
    if !(WEIGHT_MIN..=WEIGHT_MAX).contains(&ideal_weight) {
        return Vec::new();
    }

    let ticks = (WEIGHT_OFFSET_MAX / WEIGHT_OFFSET_STEP).round() as i64;
    let mut out = Vec::new();
    for tick in -ticks..=ticks {
        // Round to 3 decimals first so every later step sees the weight the
        // bill would carry.
        let weight = round_dp(ideal_weight + tick as f64 * WEIGHT_OFFSET_STEP, 3);
        if !(WEIGHT_MIN..=WEIGHT_MAX).contains(&weight) {
            continue;
        }
        if let Some(candidate) = evaluate_pair(target, weight, rate) {
            out.push(candidate);
        }
    }
    out
}

/// Evaluate one (weight, rate) pair; `None` when it fails the admission
/// window or the accuracy limit.
fn evaluate_pair(target: f64, weight: f64, rate: f64) -> Option<Candidate> {
    let raw_product = weight * rate;
    let raw_with_gst = raw_product * GST_MULTIPLIER;
    if raw_with_gst < target - ADMISSION_WINDOW || raw_with_gst > target + ADMISSION_WINDOW {
        return None;
    }

    // Split the needed GST into two identically truncated halves. The
    // truncation shortfall versus the exact need is part of the billing
    // rule; it is never redistributed.
    let total_gst_needed = target - raw_product;
    let half_gst = total_gst_needed / 2.0;
    let cgst = trunc_dp(half_gst, 2);
    let sgst = trunc_dp(half_gst, 2);
    let total_gst = cgst + sgst;

    // Re-choose the base value's second decimal so value + GST lands as
    // close to the target as possible.
    let base_value = trunc_dp(raw_product, 1);
    let mut best_value = base_value;
    let mut best_diff = f64::INFINITY;
    for digit in 0..=9 {
        let test_value = base_value + digit as f64 / 100.0;
        let test_total = test_value + total_gst;
        let test_diff = (target - test_total).abs();
        if test_diff < best_diff {
            best_diff = test_diff;
            best_value = test_value;
        }
    }

    let final_total = best_value + total_gst;
    let accuracy = (target - final_total).abs();
    if accuracy > ACCURACY_LIMIT {
        return None;
    }

    let difference = target - raw_product;
    let half_difference = difference / 2.0;
    Some(Candidate {
        weight,
        rate,
        raw_product: round_dp(raw_product, 4),
        difference: round_dp(difference, 4),
        half_difference: round_dp(half_difference, 4),
        cgst,
        sgst,
        total_gst,
        value: best_value,
        final_total: round_dp(final_total, 2),
        accuracy,
    })
}
