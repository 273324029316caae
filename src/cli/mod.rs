//! Command-line parsing for the reverse billing search.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the search/formatting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gst",
    version,
    about = "Reverse gold billing search (GST-exact weight x rate combinations)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for billing options and print the summary and ranked table.
    Solve(SolveArgs),
    /// Print the ranked options table only (useful for scripting).
    List(SolveArgs),
    /// Print the receipt breakdown for one ranked option.
    Receipt(ReceiptArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying search pipeline as `gst solve`, but
    /// renders the form, the options list, and the receipt in a terminal UI
    /// using Ratatui.
    Tui(TuiArgs),
}

/// Common options for searching and listing.
#[derive(Debug, Parser, Clone)]
pub struct SolveArgs {
    /// Target bill amount (currency units).
    #[arg(short = 'a', long)]
    pub amount: f64,

    /// Minimum gold rate (currency units per gram).
    #[arg(long)]
    pub min_rate: f64,

    /// Maximum gold rate (currency units per gram).
    #[arg(long)]
    pub max_rate: f64,

    /// Show at most N ranked options (the search itself caps at 10).
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Export the run (request + options) to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the ranked options to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,
}

/// Options for printing a single receipt.
#[derive(Debug, Parser)]
pub struct ReceiptArgs {
    /// Target bill amount (currency units).
    #[arg(short = 'a', long)]
    pub amount: f64,

    /// Minimum gold rate (currency units per gram).
    #[arg(long)]
    pub min_rate: f64,

    /// Maximum gold rate (currency units per gram).
    #[arg(long)]
    pub max_rate: f64,

    /// 1-based rank of the option to print.
    #[arg(short = 'o', long, default_value_t = 1)]
    pub option: usize,
}

/// Options for the interactive TUI (all optional form prefills).
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Prefill the target amount field.
    #[arg(short = 'a', long)]
    pub amount: Option<f64>,

    /// Prefill the minimum rate field.
    #[arg(long)]
    pub min_rate: Option<f64>,

    /// Prefill the maximum rate field.
    #[arg(long)]
    pub max_rate: Option<f64>,
}
