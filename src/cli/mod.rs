//! Command-line parsing for the weekday seasonality analyzer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! statistics code; `app` turns `Cli` into a `RunConfig`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_LOOKBACK, SourceKind};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dow",
    version,
    about = "Analyze historical stock returns by day of the week"
)]
pub struct Cli {
    /// Stock ticker (e.g. AAPL). Case-insensitive.
    #[arg(short, long)]
    pub ticker: String,

    /// Data period (e.g. 1y, 2y, 5y, max).
    #[arg(short, long, default_value = "5y")]
    pub period: String,

    /// Where daily prices come from.
    #[arg(long, value_enum, default_value_t = SourceKind::Yahoo)]
    pub source: SourceKind,

    /// Directory for the chart and report files.
    #[arg(short, long, env = "DOW_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// How many recent prices to list for the best buy/sell days.
    #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
    pub lookback: usize,

    /// Skip the SVG chart artifact.
    #[arg(long)]
    pub no_chart: bool,

    /// Also write the full result as JSON.
    #[arg(long)]
    pub export_json: bool,

    /// Print ASCII buy/sell score bars to the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Seed for `--source sample`.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Calendar days of synthetic data when the period is `max` or unrecognized.
    #[arg(long, default_value_t = 3650)]
    pub days: usize,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}
