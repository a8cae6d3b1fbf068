//! Shared domain types.
//!
//! Every value here is derived from the price series on each run and never
//! mutated afterwards. All statistics are plain `f64` scalars; "undefined"
//! is always spelled `Option::None`, never a NaN smuggled through.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::Serialize;

/// Guard against division by zero in volatility and buy/sell score ratios.
pub const EPSILON: f64 = 1e-9;

/// Default number of recent same-weekday prices to look up.
pub const DEFAULT_LOOKBACK: usize = 4;

/// Calendar day of week, in fixed Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Days equity markets trade on; this is also the report order.
    pub const TRADING: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    pub fn of(date: NaiveDate) -> Self {
        DayOfWeek::from(date.weekday())
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Three-letter label for compact terminal output.
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One closing price per trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Daily simple return of a price point relative to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnRecord {
    pub date: NaiveDate,
    pub weekday: DayOfWeek,
    pub daily_return: f64,
}

/// Return distribution for one weekday.
///
/// `std_dev` uses the sample convention (divide by `n - 1`), so it is
/// undefined for a weekday with a single return. `volatility` inherits that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub weekday: DayOfWeek,
    pub count: usize,
    pub mean_return: f64,
    pub median_return: f64,
    pub std_dev: Option<f64>,
    /// `std_dev / (|mean_return| + EPSILON)`.
    pub volatility: Option<f64>,
}

/// One row of the score table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub stats: WeekdayStats,
    /// `(median + mean) / (volatility + EPSILON)`.
    pub buy_sell_score: Option<f64>,
}

impl ScoreRow {
    pub fn weekday(&self) -> DayOfWeek {
        self.stats.weekday
    }
}

/// Per-weekday statistics in Monday..Friday order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreTable {
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn get(&self, day: DayOfWeek) -> Option<&ScoreRow> {
        self.rows.iter().find(|r| r.weekday() == day)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Final advisory output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub best_buy_day: DayOfWeek,
    pub best_sell_day: DayOfWeek,
    /// Most recent prices on `best_buy_day`, oldest first.
    pub recent_buy_prices: Vec<PricePoint>,
    /// Most recent prices on `best_sell_day`, oldest first.
    pub recent_sell_prices: Vec<PricePoint>,
    /// Last price of the full series.
    pub current_price: f64,
    /// Bounded to `[1, 10]`, one decimal place.
    pub score: f64,
}

/// Where daily prices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Yahoo Finance daily chart data.
    Yahoo,
    /// Deterministic synthetic business-day prices (offline).
    Sample,
}

impl SourceKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::Yahoo => "Yahoo Finance",
            SourceKind::Sample => "Synthetic sample",
        }
    }
}

/// Inputs of the pure analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisConfig {
    /// Uppercased ticker symbol.
    pub ticker: String,
    /// Period specifier, e.g. `1y`, `5y`, `max`.
    pub period: String,
    /// How many recent same-weekday prices to report.
    pub lookback: usize,
}

/// Everything the binary needs for one run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub analysis: AnalysisConfig,
    pub source: SourceKind,
    pub output_dir: PathBuf,
    pub chart: bool,
    pub export_json: bool,
    pub plot: bool,
    pub sample_seed: u64,
    pub sample_days: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_follows_calendar() {
        // 2024-01-01 was a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(DayOfWeek::of(monday), DayOfWeek::Monday);
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(DayOfWeek::of(saturday), DayOfWeek::Saturday);
        assert!(DayOfWeek::of(saturday).is_weekend());
        assert_eq!(DayOfWeek::Wednesday.short_name(), "Wed");
    }

    #[test]
    fn trading_days_are_monday_first_and_ordered() {
        let mut sorted = DayOfWeek::TRADING;
        sorted.sort();
        assert_eq!(sorted, DayOfWeek::TRADING);
        assert!(DayOfWeek::TRADING.iter().all(|d| !d.is_weekend()));
    }
}
