//! The analysis pipeline shared by every front-end.
//!
//! source -> returns -> weekday aggregates -> score table -> recommendation
//!
//! No file I/O happens in here; callers write artifacts only after this
//! returns `Ok`, so a failed run leaves nothing behind.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::{aggregate_by_weekday, build_score_table, compute_returns, recommend};
use crate::data::PriceSource;
use crate::domain::{AnalysisConfig, DayOfWeek, PricePoint, Recommendation, ScoreTable};
use crate::error::{AnalysisError, AppError};

/// All computed outputs of a single run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub config: AnalysisConfig,
    pub source_name: String,
    #[serde(skip)]
    pub series: Vec<PricePoint>,
    pub n_prices: usize,
    pub n_returns: usize,
    pub table: ScoreTable,
    pub recommendation: Recommendation,
}

/// Fetch prices from `source` and analyze them.
pub fn run_analysis(config: &AnalysisConfig, source: &dyn PriceSource) -> Result<AnalysisOutput, AppError> {
    info!(ticker = %config.ticker, period = %config.period, source = source.source_name(), "fetching prices");
    let series = source.fetch(&config.ticker, &config.period)?;
    let output = analyze_series(config, source.source_name(), series)?;
    Ok(output)
}

/// Analyze an already-fetched, normalized price series.
pub fn analyze_series(
    config: &AnalysisConfig,
    source_name: &str,
    series: Vec<PricePoint>,
) -> Result<AnalysisOutput, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::NoData {
            ticker: config.ticker.clone(),
            period: config.period.clone(),
        });
    }

    let returns = compute_returns(&series)?;
    debug!(prices = series.len(), returns = returns.len(), "computed daily returns");

    let stats = aggregate_by_weekday(&returns);
    for day in DayOfWeek::TRADING {
        if !stats.iter().any(|s| s.weekday == day) {
            warn!(weekday = day.name(), "no returns recorded for weekday");
        }
    }

    let table = build_score_table(stats);
    let recommendation = recommend(&table, &series, config.lookback)?;

    Ok(AnalysisOutput {
        config: config.clone(),
        source_name: source_name.to_string(),
        n_prices: series.len(),
        n_returns: returns.len(),
        series,
        table,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedSource(Vec<PricePoint>);

    impl PriceSource for FixedSource {
        fn source_name(&self) -> &'static str {
            "fixed"
        }

        fn fetch(&self, _ticker: &str, _period: &str) -> Result<Vec<PricePoint>, AppError> {
            Ok(self.0.clone())
        }
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            ticker: "TEST".to_string(),
            period: "5y".to_string(),
            lookback: 4,
        }
    }

    /// Two weeks of business days starting Monday 2024-01-01.
    fn two_weeks() -> Vec<PricePoint> {
        let prices = [100.0, 101.0, 99.0, 102.0, 103.0, 101.0, 104.0, 105.0, 103.0, 106.0];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut out = Vec::new();
        let mut date = start;
        for p in prices {
            while DayOfWeek::of(date).is_weekend() {
                date += chrono::Duration::days(1);
            }
            out.push(PricePoint::new(date, p));
            date += chrono::Duration::days(1);
        }
        out
    }

    #[test]
    fn empty_source_is_no_data() {
        let err = run_analysis(&config(), &FixedSource(Vec::new())).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_NO_DATA);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn single_price_is_insufficient_data() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = analyze_series(&config(), "fixed", vec![PricePoint::new(d, 10.0)]).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData);
    }

    #[test]
    fn two_week_example_end_to_end() {
        let out = run_analysis(&config(), &FixedSource(two_weeks())).unwrap();
        assert_eq!(out.n_prices, 10);
        assert_eq!(out.n_returns, 9);

        let days: Vec<DayOfWeek> = out.table.rows.iter().map(|r| r.weekday()).collect();
        assert_eq!(days, DayOfWeek::TRADING.to_vec());

        // Monday has a single return (the first Monday has no predecessor).
        let monday = out.table.get(DayOfWeek::Monday).unwrap();
        assert_eq!(monday.stats.count, 1);
        assert!(monday.buy_sell_score.is_none());

        // Tue: +1.00%, +2.97%; Fri: +0.98%, +2.91%. Both have volatility ~0.70,
        // Tuesday edges ahead on the centre. Wednesday has the lowest score.
        let rec = &out.recommendation;
        assert_eq!(rec.best_buy_day, DayOfWeek::Tuesday);
        assert_eq!(rec.best_sell_day, DayOfWeek::Wednesday);
        assert_eq!(rec.current_price, 106.0);
        assert_eq!(
            rec.recent_buy_prices.iter().map(|p| p.price).collect::<Vec<_>>(),
            vec![101.0, 104.0]
        );
        assert_eq!(
            rec.recent_sell_prices.iter().map(|p| p.price).collect::<Vec<_>>(),
            vec![99.0, 105.0]
        );
        // 5 + 2 (score > 0.01) - 1 (volatility > 0.05) - 1 (106 is not below 104).
        assert_eq!(rec.score, 5.0);
        assert!((1.0..=10.0).contains(&rec.score));
        assert!(((rec.score * 10.0).round() - rec.score * 10.0).abs() < 1e-9);

        // Deterministic across runs.
        let again = run_analysis(&config(), &FixedSource(two_weeks())).unwrap();
        assert_eq!(again.recommendation, out.recommendation);
    }

    #[test]
    fn all_zero_returns_still_score_in_range() {
        let mut series = two_weeks();
        for p in &mut series {
            p.price = 50.0;
        }
        let out = analyze_series(&config(), "fixed", series).unwrap();
        // Every defined score is exactly zero, so Tuesday wins both ties.
        assert_eq!(out.recommendation.best_buy_day, DayOfWeek::Tuesday);
        assert_eq!(out.recommendation.best_sell_day, DayOfWeek::Tuesday);
        // 5 + 0 (score) + 1 (zero vol) - 1 (price not below latest Tuesday) = 5.
        assert_eq!(out.recommendation.score, 5.0);
    }
}
