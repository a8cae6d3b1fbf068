//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the tracing subscriber
//! - builds the price source
//! - runs the analysis pipeline
//! - writes artifacts and prints the summary

use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::data::{PriceSource, SampleSource, YahooClient};
use crate::domain::{AnalysisConfig, RunConfig, SourceKind};
use crate::error::{AppError, EXIT_USAGE};
use crate::io::{ArtifactOptions, Clock, SystemClock, WrittenArtifacts, write_artifacts};

pub mod pipeline;

use pipeline::AnalysisOutput;

/// Width of the `--plot` score bars.
const PLOT_WIDTH: usize = 40;

/// Entry point for the `dow` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = run_config_from_cli(&cli)?;
    debug!(?config, "resolved run configuration");

    let source = build_source(&config)?;
    let result = execute(&config, source.as_ref(), &SystemClock)?;

    println!("{}", crate::report::format_summary(&result.output));
    if config.plot {
        println!(
            "{}",
            crate::plot::render_score_bars(&result.output.table, PLOT_WIDTH)
        );
    }

    println!("Analysis complete! Results saved to:");
    if let Some(chart) = &result.written.chart {
        println!("- Chart: {}", chart.display());
    }
    println!("- Log: {}", result.written.report.display());
    if let Some(json) = &result.written.json {
        println!("- JSON: {}", json.display());
    }

    Ok(())
}

/// Outputs of a successful run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub output: AnalysisOutput,
    pub written: WrittenArtifacts,
}

/// Run the pipeline, then write artifacts.
///
/// Artifacts are only written once the pipeline has succeeded.
pub fn execute(config: &RunConfig, source: &dyn PriceSource, clock: &dyn Clock) -> Result<RunResult, AppError> {
    let output = pipeline::run_analysis(&config.analysis, source)?;

    let options = ArtifactOptions {
        output_dir: config.output_dir.clone(),
        chart: config.chart,
        export_json: config.export_json,
    };
    let written = write_artifacts(&output, &options, clock)?;

    Ok(RunResult { output, written })
}

/// Validate and normalize CLI arguments into a `RunConfig`.
pub fn run_config_from_cli(cli: &Cli) -> Result<RunConfig, AppError> {
    let ticker = cli.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(AppError::new(EXIT_USAGE, "Ticker must not be empty."));
    }
    let period = cli.period.trim().to_string();
    if period.is_empty() {
        return Err(AppError::new(EXIT_USAGE, "Period must not be empty."));
    }
    if cli.lookback == 0 {
        return Err(AppError::new(EXIT_USAGE, "Lookback must be at least 1."));
    }

    Ok(RunConfig {
        analysis: AnalysisConfig {
            ticker,
            period,
            lookback: cli.lookback,
        },
        source: cli.source,
        output_dir: cli.output_dir.clone(),
        chart: !cli.no_chart,
        export_json: cli.export_json,
        plot: cli.plot,
        sample_seed: cli.seed,
        sample_days: cli.days,
    })
}

fn build_source(config: &RunConfig) -> Result<Box<dyn PriceSource>, AppError> {
    Ok(match config.source {
        SourceKind::Yahoo => Box::new(YahooClient::from_env()?),
        SourceKind::Sample => Box::new(SampleSource::new(
            config.sample_seed,
            config.sample_days,
            Local::now().date_naive(),
        )),
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Fails only if a global subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use chrono::NaiveDate;

    use crate::domain::PricePoint;
    use crate::error::{EXIT_INSUFFICIENT, EXIT_NO_DATA};
    use crate::io::FixedClock;

    struct FixedSource(Vec<PricePoint>);

    impl PriceSource for FixedSource {
        fn source_name(&self) -> &'static str {
            "fixed"
        }

        fn fetch(&self, _ticker: &str, _period: &str) -> Result<Vec<PricePoint>, AppError> {
            Ok(self.0.clone())
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 3, 7)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        )
    }

    fn config(dir: PathBuf) -> RunConfig {
        let cli = Cli::parse_from(["dow", "--ticker", " spy ", "--export-json"]);
        let mut config = run_config_from_cli(&cli).unwrap();
        config.output_dir = dir;
        config
    }

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dow-app-{tag}-{}", std::process::id()))
    }

    fn files_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[test]
    fn cli_values_are_normalized() {
        let cli = Cli::parse_from(["dow", "--ticker", " brk-b ", "--period", " 1y "]);
        let config = run_config_from_cli(&cli).unwrap();
        assert_eq!(config.analysis.ticker, "BRK-B");
        assert_eq!(config.analysis.period, "1y");
        assert!(config.chart);
    }

    #[test]
    fn blank_ticker_and_zero_lookback_are_usage_errors() {
        let cli = Cli::parse_from(["dow", "--ticker", "  "]);
        assert_eq!(run_config_from_cli(&cli).unwrap_err().exit_code(), EXIT_USAGE);

        let cli = Cli::parse_from(["dow", "--ticker", "IBM", "--lookback", "0"]);
        assert_eq!(run_config_from_cli(&cli).unwrap_err().exit_code(), EXIT_USAGE);
    }

    #[test]
    fn no_data_exits_nonzero_and_writes_nothing() {
        let dir = temp_dir("no-data");
        let err = execute(&config(dir.clone()), &FixedSource(Vec::new()), &clock()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
        assert!(err.to_string().contains("SPY"));
        assert_eq!(files_in(&dir), 0);
    }

    #[test]
    fn insufficient_data_writes_nothing() {
        let dir = temp_dir("insufficient");
        let d = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let series = vec![PricePoint::new(d, 10.0), PricePoint::new(d.succ_opt().unwrap(), 11.0)];
        let err = execute(&config(dir.clone()), &FixedSource(series), &clock()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INSUFFICIENT);
        assert_eq!(files_in(&dir), 0);
    }

    #[test]
    fn successful_run_writes_all_artifacts() {
        let dir = temp_dir("ok");
        let source = SampleSource::new(3, 365, NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        let result = execute(&config(dir.clone()), &source, &clock()).unwrap();

        assert_eq!(result.output.config.ticker, "SPY");
        assert!((1.0..=10.0).contains(&result.output.recommendation.score));
        assert!(result.written.chart.is_some());
        assert!(result.written.json.is_some());
        assert_eq!(files_in(&dir), 3);

        std::fs::remove_dir_all(&dir).ok();
    }
}
