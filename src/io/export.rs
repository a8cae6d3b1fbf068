//! Write run artifacts: text report, optional chart, optional JSON.
//!
//! Called only after the pipeline succeeded, so a failed run never leaves
//! partial files behind.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::pipeline::AnalysisOutput;
use crate::error::{AppError, EXIT_USAGE};
use crate::io::naming::{ArtifactPaths, Clock};
use crate::plot::write_metrics_chart;
use crate::report::{format_report, normalize_for_chart};

/// Which artifacts to produce and where.
#[derive(Debug, Clone)]
pub struct ArtifactOptions {
    pub output_dir: PathBuf,
    pub chart: bool,
    pub export_json: bool,
}

/// Paths of the artifacts actually written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub report: PathBuf,
    pub chart: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

pub fn write_artifacts(
    output: &AnalysisOutput,
    options: &ArtifactOptions,
    clock: &dyn Clock,
) -> Result<WrittenArtifacts, AppError> {
    create_dir_all(&options.output_dir).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to create output dir '{}': {e}", options.output_dir.display()),
        )
    })?;

    let paths = ArtifactPaths::new(
        &options.output_dir,
        &output.config.ticker,
        &output.config.period,
        clock,
    );

    let chart = if options.chart {
        let title = format!(
            "{} ({}) - Normalized Metrics",
            output.config.ticker, output.config.period
        );
        write_metrics_chart(&paths.chart, &title, &normalize_for_chart(&output.table))?;
        Some(paths.chart.clone())
    } else {
        None
    };

    write_report(&paths.report, &format_report(output))?;

    let json = if options.export_json {
        write_result_json(&paths.json, output)?;
        Some(paths.json.clone())
    } else {
        None
    };

    info!(report = %paths.report.display(), "artifacts written");
    Ok(WrittenArtifacts {
        report: paths.report,
        chart,
        json,
    })
}

/// Write the formatted text report.
pub fn write_report(path: &Path, text: &str) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write report: {e}")))?;
    Ok(())
}

/// Write the full analysis result as pretty JSON.
pub fn write_result_json(path: &Path, output: &AnalysisOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create result JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, output)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::app::pipeline::analyze_series;
    use crate::domain::{AnalysisConfig, DayOfWeek, PricePoint};
    use crate::io::naming::FixedClock;

    fn sample_output() -> AnalysisOutput {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series: Vec<PricePoint> = (0..60)
            .map(|i| start + chrono::Duration::days(i))
            .filter(|d| !DayOfWeek::of(*d).is_weekend())
            .enumerate()
            .map(|(i, d)| PricePoint::new(d, 100.0 + ((i * 7) % 11) as f64))
            .collect();
        let config = AnalysisConfig {
            ticker: "TEST".to_string(),
            period: "3mo".to_string(),
            lookback: 4,
        };
        analyze_series(&config, "fixed", series).unwrap()
    }

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dow-export-{tag}-{}", std::process::id()))
    }

    #[test]
    fn writes_report_chart_and_json() {
        let dir = temp_dir("all");
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        );
        let options = ArtifactOptions {
            output_dir: dir.clone(),
            chart: true,
            export_json: true,
        };

        let written = write_artifacts(&sample_output(), &options, &clock).unwrap();
        assert_eq!(written.report, dir.join("TEST_3mo_Jan-02-2025_09-30-00_AM_log.txt"));

        let report = std::fs::read_to_string(&written.report).unwrap();
        assert!(report.contains("Stock Ticker: TEST"));
        assert!(written.chart.as_ref().unwrap().exists());

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(written.json.unwrap()).unwrap()).unwrap();
        assert_eq!(json["config"]["ticker"], "TEST");
        assert!(json["recommendation"]["score"].as_f64().is_some());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn optional_artifacts_can_be_skipped() {
        let dir = temp_dir("report-only");
        let options = ArtifactOptions {
            output_dir: dir.clone(),
            chart: false,
            export_json: false,
        };
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(21, 0, 0)
                .unwrap(),
        );

        let written = write_artifacts(&sample_output(), &options, &clock).unwrap();
        assert!(written.chart.is_none());
        assert!(written.json.is_none());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
