//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the billing search pipeline
//! - prints summaries, tables, and receipts
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ReceiptArgs, SolveArgs};
use crate::domain::SearchRequest;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gst` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `gst` to open the TUI and `gst -a 10000 ...` to behave
    // like `gst solve -a 10000 ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Solve(args) => handle_solve(args, OutputMode::Full),
        Command::List(args) => handle_solve(args, OutputMode::TableOnly),
        Command::Receipt(args) => handle_receipt(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TableOnly,
}

fn handle_solve(args: SolveArgs, mode: OutputMode) -> Result<(), AppError> {
    let request = SearchRequest::new(args.amount, args.min_rate, args.max_rate)?;
    let run = pipeline::run_search(&request);

    if mode == OutputMode::Full {
        println!("{}", crate::report::format_run_summary(&run));
    }
    println!(
        "{}",
        crate::report::format_options_table(&run.candidates, request.target, args.top)
    );

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::write_options_json(path, &run)?;
    }
    if let Some(path) = &args.export_csv {
        crate::io::write_options_csv(path, &run)?;
    }

    Ok(())
}

fn handle_receipt(args: ReceiptArgs) -> Result<(), AppError> {
    let request = SearchRequest::new(args.amount, args.min_rate, args.max_rate)?;
    let run = pipeline::run_search(&request);

    let Some(candidate) = args
        .option
        .checked_sub(1)
        .and_then(|idx| run.candidates.get(idx))
    else {
        return Err(AppError::new(
            3,
            format!(
                "Option {} not available ({} found).",
                args.option,
                run.candidates.len()
            ),
        ));
    };

    println!(
        "{}",
        crate::report::format_receipt(candidate, request.target, args.option)
    );
    Ok(())
}

/// Rewrite argv so `gst` defaults to `gst tui` and a flag-first invocation
/// defaults to `gst solve`.
///
/// Rules:
/// - `gst`                      -> `gst tui`
/// - `gst -a 10000 ...`         -> `gst solve -a 10000 ...`
/// - `gst --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "solve" | "list" | "receipt" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "solve flags".
    if arg1.starts_with('-') {
        argv.insert(1, "solve".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["gst"])), argv(&["gst", "tui"]));
    }

    #[test]
    fn flag_first_invocation_defaults_to_solve() {
        assert_eq!(
            rewrite_args(argv(&["gst", "-a", "10000"])),
            argv(&["gst", "solve", "-a", "10000"])
        );
    }

    #[test]
    fn explicit_subcommands_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["gst", "receipt", "-a", "10000"])),
            argv(&["gst", "receipt", "-a", "10000"])
        );
    }

    #[test]
    fn help_and_version_pass_through() {
        assert_eq!(rewrite_args(argv(&["gst", "--help"])), argv(&["gst", "--help"]));
        assert_eq!(rewrite_args(argv(&["gst", "-V"])), argv(&["gst", "-V"]));
    }
}
