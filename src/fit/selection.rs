//! Candidate ranking and uniqueness filtering.
//!
//! Ordering rule (one comparator, two tiers):
//!
//! - primary: `|target - rawProduct * 1.03|`, how close the pre-adjustment
//!   product lands to the target
//! - when two primaries differ by less than `RANK_TIE_TOLERANCE`, the
//!   final-total accuracy decides instead
//!
//! The tolerance tier means the rule is not a total order (chains of
//! near-tolerance gaps can defeat transitivity), so ranking extracts winners
//! with repeated linear scans (the earliest candidate wins exact ties)
//! instead of handing the comparator to a library sort.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::Candidate;
use crate::fit::fitter::GST_MULTIPLIER;

/// Primary-tier tolerance below which accuracy breaks the tie.
pub const RANK_TIE_TOLERANCE: f64 = 0.1;
/// Maximum number of unique candidates returned by a search.
pub const MAX_RESULTS: usize = 10;

/// The two-tier ordering rule. `Less` means "ranks earlier".
pub fn compare_candidates(a: &Candidate, b: &Candidate, target: f64) -> Ordering {
    let a_diff = (target - a.raw_product * GST_MULTIPLIER).abs();
    let b_diff = (target - b.raw_product * GST_MULTIPLIER).abs();

    if (a_diff - b_diff).abs() < RANK_TIE_TOLERANCE {
        a.accuracy.partial_cmp(&b.accuracy).unwrap_or(Ordering::Equal)
    } else {
        a_diff.partial_cmp(&b_diff).unwrap_or(Ordering::Equal)
    }
}

/// Rank the pool under `compare_candidates` and keep the first occurrence of
/// each (weight, rate) pair, stopping once `max_results` unique candidates
/// are collected.
pub fn rank_and_dedup(mut pool: Vec<Candidate>, target: f64, max_results: usize) -> Vec<Candidate> {
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    let mut out = Vec::with_capacity(max_results.min(pool.len()));

    while out.len() < max_results && !pool.is_empty() {
        let mut best = 0;
        for i in 1..pool.len() {
            if compare_candidates(&pool[i], &pool[best], target) == Ordering::Less {
                best = i;
            }
        }
        // `remove` keeps the remaining pool in its original order, which is
        // what makes ties deterministic across rounds.
        let candidate = pool.remove(best);
        if seen.insert(candidate.pair_key()) {
            out.push(candidate);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a candidate whose primary key lands `diff` away from the target
    /// (target fixed at 100.0 in these tests).
    fn candidate(diff: f64, accuracy: f64, weight: f64, rate: f64) -> Candidate {
        Candidate {
            weight,
            rate,
            raw_product: (100.0 - diff) / GST_MULTIPLIER,
            difference: 0.0,
            half_difference: 0.0,
            cgst: 0.0,
            sgst: 0.0,
            total_gst: 0.0,
            value: 0.0,
            final_total: 100.0 - accuracy,
            accuracy,
        }
    }

    #[test]
    fn separated_primaries_order_by_product_distance() {
        // 0.5 apart: the primary tier decides even though `a` has the worse
        // accuracy.
        let a = candidate(0.0, 0.009, 1.0, 100.0);
        let b = candidate(0.5, 0.0, 1.001, 100.0);
        assert_eq!(compare_candidates(&a, &b, 100.0), Ordering::Less);
        assert_eq!(compare_candidates(&b, &a, 100.0), Ordering::Greater);
    }

    #[test]
    fn near_tied_primaries_order_by_accuracy() {
        // 0.05 apart (inside the tolerance): accuracy decides.
        let a = candidate(0.30, 0.009, 1.0, 100.0);
        let b = candidate(0.35, 0.001, 1.001, 100.0);
        assert_eq!(compare_candidates(&a, &b, 100.0), Ordering::Greater);
        assert_eq!(compare_candidates(&b, &a, 100.0), Ordering::Less);
    }

    #[test]
    fn ranking_respects_separated_primaries_regardless_of_accuracy() {
        let pool = vec![
            candidate(0.9, 0.0, 1.0, 100.0),
            candidate(0.2, 0.010, 1.001, 100.0),
            candidate(0.5, 0.005, 1.002, 100.0),
        ];
        let ranked = rank_and_dedup(pool, 100.0, MAX_RESULTS);
        let diffs: Vec<f64> = ranked
            .iter()
            .map(|c| (100.0 - c.raw_product * GST_MULTIPLIER).abs())
            .collect();
        assert!(diffs[0] < diffs[1] && diffs[1] < diffs[2]);
    }

    #[test]
    fn dedup_keeps_the_first_occurrence_of_a_pair() {
        // Same (weight, rate) pair twice; the better-ranked copy survives.
        let pool = vec![
            candidate(0.2, 0.008, 1.0, 100.0),
            candidate(0.21, 0.001, 1.0, 100.0),
            candidate(0.6, 0.002, 2.0, 100.0),
        ];
        let ranked = rank_and_dedup(pool, 100.0, MAX_RESULTS);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].accuracy, 0.001);
        assert_eq!(ranked[1].weight, 2.0);
    }

    #[test]
    fn ranking_caps_the_result_count() {
        let pool: Vec<Candidate> = (0..15)
            .map(|i| candidate(0.01 * i as f64, 0.001, 1.0 + i as f64 * 0.001, 100.0))
            .collect();
        let ranked = rank_and_dedup(pool, 100.0, MAX_RESULTS);
        assert_eq!(ranked.len(), MAX_RESULTS);
    }

    #[test]
    fn exact_ties_keep_pool_order() {
        let pool = vec![
            candidate(0.3, 0.004, 1.0, 100.0),
            candidate(0.3, 0.004, 2.0, 100.0),
        ];
        let ranked = rank_and_dedup(pool, 100.0, MAX_RESULTS);
        assert_eq!(ranked[0].weight, 1.0);
        assert_eq!(ranked[1].weight, 2.0);
    }
}
