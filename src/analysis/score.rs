//! Score table, best-day selection, and the bounded recommendation score.
//!
//! Selection rules:
//! 1. `buy_sell_score = (median + mean) / (volatility + EPSILON)`
//! 2. Best buy day has the maximum score, best sell day the minimum, among
//!    weekdays whose score is defined
//! 3. Ties go to the earlier weekday (Monday first), for both max and min
//!
//! Recommendation score starts at 5.0:
//! - buy/sell score of the buy day `> 0.01` adds 2, `< 0` subtracts 2
//! - volatility of the buy day `< 0.02` adds 1, `> 0.05` subtracts 1
//! - current price below the latest buy-day price adds 1, otherwise subtracts 1
//!   (skipped when no buy-day price exists)
//!
//! The result is clamped to `[1, 10]` and rounded to one decimal.

use tracing::{debug, info};

use crate::domain::{
    DayOfWeek, EPSILON, PricePoint, Recommendation, ScoreRow, ScoreTable, WeekdayStats,
};
use crate::error::AnalysisError;

const BASELINE_SCORE: f64 = 5.0;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

const STRONG_BUY_SCORE: f64 = 0.01;
const LOW_VOLATILITY: f64 = 0.02;
const HIGH_VOLATILITY: f64 = 0.05;

/// Attach a buy/sell score to each weekday's statistics.
pub fn build_score_table(stats: Vec<WeekdayStats>) -> ScoreTable {
    let mut rows: Vec<ScoreRow> = stats
        .into_iter()
        .map(|stats| {
            let buy_sell_score = stats
                .volatility
                .map(|vol| (stats.median_return + stats.mean_return) / (vol + EPSILON))
                .filter(|s| s.is_finite());
            ScoreRow {
                stats,
                buy_sell_score,
            }
        })
        .collect();
    rows.sort_by_key(|r| r.weekday());
    ScoreTable { rows }
}

/// Pick `(best_buy_day, best_sell_day)`.
pub fn select_best_days(table: &ScoreTable) -> Result<(DayOfWeek, DayOfWeek), AnalysisError> {
    let mut best_buy: Option<(DayOfWeek, f64)> = None;
    let mut best_sell: Option<(DayOfWeek, f64)> = None;

    for day in DayOfWeek::TRADING {
        let Some(score) = table.get(day).and_then(|r| r.buy_sell_score) else {
            continue;
        };
        // Strict comparisons keep the earliest weekday on ties.
        if best_buy.is_none_or(|(_, s)| score > s) {
            best_buy = Some((day, score));
        }
        if best_sell.is_none_or(|(_, s)| score < s) {
            best_sell = Some((day, score));
        }
    }

    match (best_buy, best_sell) {
        (Some((buy, _)), Some((sell, _))) => Ok((buy, sell)),
        _ => Err(AnalysisError::InsufficientData),
    }
}

/// The last `n` prices that fell on `day`, oldest first.
///
/// Returns fewer than `n` (possibly none) when the series is short.
pub fn recent_prices(series: &[PricePoint], day: DayOfWeek, n: usize) -> Vec<PricePoint> {
    let mut out: Vec<PricePoint> = series
        .iter()
        .rev()
        .filter(|p| DayOfWeek::of(p.date) == day)
        .take(n)
        .copied()
        .collect();
    out.reverse();
    out
}

/// Heuristic 1..10 score for buying on the best buy day this week.
pub fn recommendation_score(
    buy_sell_score: f64,
    volatility: f64,
    current_price: f64,
    latest_buy_day_price: Option<f64>,
) -> f64 {
    let mut score = BASELINE_SCORE;

    if buy_sell_score > STRONG_BUY_SCORE {
        score += 2.0;
    } else if buy_sell_score < 0.0 {
        score -= 2.0;
    }

    if volatility < LOW_VOLATILITY {
        score += 1.0;
    } else if volatility > HIGH_VOLATILITY {
        score -= 1.0;
    }

    if let Some(reference) = latest_buy_day_price {
        if current_price < reference {
            score += 1.0;
        } else {
            score -= 1.0;
        }
    }

    round_one_decimal(score.clamp(MIN_SCORE, MAX_SCORE))
}

fn round_one_decimal(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Run the full scoring stage over a finished table and the raw series.
pub fn recommend(
    table: &ScoreTable,
    series: &[PricePoint],
    lookback: usize,
) -> Result<Recommendation, AnalysisError> {
    let current_price = series.last().ok_or(AnalysisError::EmptySeries)?.price;
    let (best_buy_day, best_sell_day) = select_best_days(table)?;

    let recent_buy_prices = recent_prices(series, best_buy_day, lookback);
    let recent_sell_prices = recent_prices(series, best_sell_day, lookback);

    let buy_row = table
        .get(best_buy_day)
        .ok_or(AnalysisError::InsufficientData)?;
    let buy_sell_score = buy_row
        .buy_sell_score
        .ok_or(AnalysisError::InsufficientData)?;
    let volatility = buy_row
        .stats
        .volatility
        .ok_or(AnalysisError::InsufficientData)?;

    let latest = recent_buy_prices.last().map(|p| p.price);
    if latest.is_none() {
        debug!(weekday = best_buy_day.name(), "no recent buy-day price; skipping price check");
    }
    let score = recommendation_score(buy_sell_score, volatility, current_price, latest);

    info!(
        buy = best_buy_day.name(),
        sell = best_sell_day.name(),
        score,
        "recommendation computed"
    );

    Ok(Recommendation {
        best_buy_day,
        best_sell_day,
        recent_buy_prices,
        recent_sell_prices,
        current_price,
        score,
    })
}
