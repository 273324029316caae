//! Export a search run to JSON or CSV.
//!
//! JSON is the "portable" representation of a run (schema:
//! `domain::OptionsFile`); CSV is meant to be easy to consume in
//! spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::OptionsFile;
use crate::error::AppError;

/// Write a run (request + ranked options) as pretty JSON.
pub fn write_options_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create options JSON '{}': {e}", path.display()),
        )
    })?;

    let schema = OptionsFile {
        tool: "gst".to_string(),
        generated_on: chrono::Local::now().date_naive(),
        request: run.request,
        rate_step: run.rate_step,
        options: run.candidates.clone(),
    };

    serde_json::to_writer_pretty(file, &schema)
        .map_err(|e| AppError::new(2, format!("Failed to write options JSON: {e}")))?;

    Ok(())
}

/// Write the ranked options as CSV rows.
pub fn write_options_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create options CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "rank,weight_gm,rate_per_gm,raw_product,difference,half_difference,cgst,sgst,total_gst,value,final_total,accuracy"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write options CSV header: {e}")))?;

    for (idx, c) in run.candidates.iter().enumerate() {
        writeln!(
            file,
            "{},{:.3},{:.1},{:.4},{:.4},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{:.6}",
            idx + 1,
            c.weight,
            c.rate,
            c.raw_product,
            c.difference,
            c.half_difference,
            c.cgst,
            c.sgst,
            c.total_gst,
            c.value,
            c.final_total,
            c.accuracy,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write options CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, SearchRequest};

    fn sample_run() -> RunOutput {
        RunOutput {
            request: SearchRequest {
                target: 10000.0,
                min_rate: 9400.0,
                max_rate: 9600.0,
            },
            rate_step: 0.2,
            candidates: vec![Candidate {
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
            }],
        }
    }

    #[test]
    fn options_json_round_trips() {
        let path = std::env::temp_dir().join("gst-fit-options-test.json");
        let run = sample_run();
        write_options_json(&path, &run).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let parsed: OptionsFile = serde_json::from_reader(file).unwrap();
        assert_eq!(parsed.tool, "gst");
        assert_eq!(parsed.request, run.request);
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options[0].weight, 1.023);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn options_csv_contains_a_header_and_one_row_per_option() {
        let path = std::env::temp_dir().join("gst-fit-options-test.csv");
        write_options_csv(&path, &sample_run()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("rank,weight_gm,rate_per_gm"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("1,1.023,9490.0,9708.2700"));

        let _ = std::fs::remove_file(&path);
    }
}
