//! Formatted terminal output for search runs.

use crate::app::pipeline::RunOutput;
use crate::domain::Candidate;
use crate::fit::{ACCURACY_LIMIT, GST_MULTIPLIER};

/// Accuracy below which an option counts as a perfect match.
pub const PERFECT_MATCH_EPS: f64 = 0.001;

/// Currency marker used in terminal output.
pub const CURRENCY: &str = "₹";

/// Format the run summary (request echo + search parameters + result count).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== gst - Reverse Gold Billing Search ===\n");
    out.push_str(&format!("Target: {CURRENCY}{:.2}\n", run.request.target));
    out.push_str(&format!(
        "Rate range: [{:.1}, {:.1}] {CURRENCY}/gm | step {:.1}\n",
        run.request.min_rate, run.request.max_rate, run.rate_step
    ));

    let perfect = run
        .candidates
        .iter()
        .filter(|c| c.accuracy < PERFECT_MATCH_EPS)
        .count();
    out.push_str(&format!(
        "Options: {} ({perfect} perfect)\n",
        run.candidates.len()
    ));

    out
}

/// Format the ranked options table, or the distinct empty-result message.
pub fn format_options_table(candidates: &[Candidate], target: f64, top: usize) -> String {
    if candidates.is_empty() {
        return "No qualifying combinations found for this target and rate range.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!("Best matches (target {CURRENCY}{target:.2}):\n"));
    out.push_str(&format!(
        "{:>4} {:>11} {:>10} {:>13} {:>12} {:>11} {:>9} {:>9} {:>12} {:<8}\n",
        "rank",
        "weight(gm)",
        "rate(/gm)",
        "raw product",
        "raw + GST",
        "value",
        "CGST",
        "SGST",
        "final total",
        "match"
    ));
    out.push_str(&format!(
        "{:->4} {:->11} {:->10} {:->13} {:->12} {:->11} {:->9} {:->9} {:->12} {:-<8}\n",
        "", "", "", "", "", "", "", "", "", ""
    ));

    for (idx, c) in candidates.iter().take(top).enumerate() {
        let marker = if c.accuracy < PERFECT_MATCH_EPS {
            "perfect"
        } else {
            ""
        };
        out.push_str(&format!(
            "{:>4} {:>11.3} {:>10.1} {:>13.4} {:>12.2} {:>11.2} {:>9.2} {:>9.2} {:>12.2} {:<8}\n",
            idx + 1,
            c.weight,
            c.rate,
            c.raw_product,
            c.raw_product * GST_MULTIPLIER,
            c.value,
            c.cgst,
            c.sgst,
            c.final_total,
            marker,
        ));
    }

    out
}

/// Format the receipt breakdown for one ranked option.
///
/// Mirrors the billing steps: weight & rate, raw product, the GST split
/// (including the pre-truncation half), and the adjusted final value, plus
/// the verification check against the target.
pub fn format_receipt(c: &Candidate, target: f64, rank: usize) -> String {
    let mut out = String::new();

    out.push_str("================= Official Receipt =================\n");
    out.push_str(&format!("Billing breakdown for option #{rank}\n\n"));
    kv(&mut out, "Target amount", money2(target));
    out.push('\n');

    out.push_str("Step 1 - Weight & rate\n");
    kv(&mut out, "Weight", format!("{:.3} gm", c.weight));
    kv(&mut out, "Rate per gram", format!("{CURRENCY}{:.1}/gm", c.rate));
    out.push('\n');

    out.push_str("Step 2 - Raw product\n");
    kv(
        &mut out,
        "Weight x rate",
        format!("{:.3} x {CURRENCY}{:.1}", c.weight, c.rate),
    );
    kv(&mut out, "Raw product", money4(c.raw_product));
    kv(
        &mut out,
        "Raw product + 3% GST",
        money2(c.raw_product * GST_MULTIPLIER),
    );
    out.push('\n');

    out.push_str("Step 3 - GST split\n");
    kv(&mut out, "Total GST needed", money4(c.difference));
    kv(&mut out, "Half GST (before truncation)", money4(c.half_difference));
    kv(&mut out, "CGST (truncated)", money2(c.cgst));
    kv(&mut out, "SGST (truncated)", money2(c.sgst));
    kv(&mut out, "Total GST", money2(c.total_gst));
    out.push('\n');

    out.push_str("Step 4 - Final value\n");
    kv(&mut out, "Adjusted value", money2(c.value));
    kv(&mut out, "+ CGST", money2(c.cgst));
    kv(&mut out, "+ SGST", money2(c.sgst));
    kv(&mut out, "Final total", money2(c.final_total));
    out.push('\n');

    if (c.final_total - target).abs() < ACCURACY_LIMIT {
        out.push_str("Exact match verified: final total meets the target.\n");
    } else {
        out.push_str(&format!(
            "Final total deviates from the target by {CURRENCY}{:.4}.\n",
            (c.final_total - target).abs()
        ));
    }

    out
}

fn kv(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("  {label:<34} {value:>14}\n"));
}

fn money2(v: f64) -> String {
    format!("{CURRENCY}{v:.2}")
}

fn money4(v: f64) -> String {
    format!("{CURRENCY}{v:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchRequest;

    fn sample_candidate() -> Candidate {
        Candidate {
            weight: 1.023,
            rate: 9490.0,
            raw_product: 9708.27,
            difference: 291.73,
            half_difference: 145.865,
            cgst: 145.86,
            sgst: 145.86,
            total_gst: 291.72,
            value: 9708.28,
            final_total: 10000.0,
            accuracy: 0.0,
        }
    }

    fn sample_run(candidates: Vec<Candidate>) -> RunOutput {
        RunOutput {
            request: SearchRequest {
                target: 10000.0,
                min_rate: 9400.0,
                max_rate: 9600.0,
            },
            rate_step: 0.2,
            candidates,
        }
    }

    #[test]
    fn summary_echoes_the_request_and_counts_perfect_matches() {
        let summary = format_run_summary(&sample_run(vec![sample_candidate()]));
        assert!(summary.contains("Target: ₹10000.00"));
        assert!(summary.contains("[9400.0, 9600.0]"));
        assert!(summary.contains("step 0.2"));
        assert!(summary.contains("Options: 1 (1 perfect)"));
    }

    #[test]
    fn table_marks_perfect_matches() {
        let table = format_options_table(&[sample_candidate()], 10000.0, 10);
        assert!(table.contains("rank"));
        assert!(table.contains("perfect"));
        assert!(table.contains("1.023"));
        assert!(table.contains("9490.0"));
    }

    #[test]
    fn table_reports_the_empty_outcome_distinctly() {
        let table = format_options_table(&[], 10000.0, 10);
        assert!(table.contains("No qualifying combinations"));
    }

    #[test]
    fn table_honors_the_top_limit() {
        let mut second = sample_candidate();
        second.weight = 1.024;
        let table = format_options_table(&[sample_candidate(), second], 10000.0, 1);
        assert!(table.contains("1.023"));
        assert!(!table.contains("1.024"));
    }

    #[test]
    fn receipt_walks_the_billing_steps() {
        let receipt = format_receipt(&sample_candidate(), 10000.0, 1);
        assert!(receipt.contains("option #1"));
        assert!(receipt.contains("CGST (truncated)"));
        assert!(receipt.contains("Half GST (before truncation)"));
        assert!(receipt.contains("₹145.8650"));
        assert!(receipt.contains("Exact match verified"));
    }

    #[test]
    fn receipt_reports_a_residual_deviation() {
        let mut off = sample_candidate();
        off.final_total = 10000.02;
        off.accuracy = 0.02;
        let receipt = format_receipt(&off, 10000.0, 2);
        assert!(receipt.contains("deviates from the target"));
    }
}
