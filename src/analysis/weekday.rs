//! Group daily returns by weekday and summarize each group.
//!
//! Output order is fixed Monday..Friday. Weekend-dated records are dropped:
//! equity markets are closed Sat/Sun, so such timestamps are anomalies.
//! A weekday without any record is simply absent from the output.

use tracing::debug;

use crate::domain::{DayOfWeek, EPSILON, ReturnRecord, WeekdayStats};

/// Summarize returns per trading weekday.
pub fn aggregate_by_weekday(records: &[ReturnRecord]) -> Vec<WeekdayStats> {
    let weekend = records.iter().filter(|r| r.weekday.is_weekend()).count();
    if weekend > 0 {
        debug!(weekend, "dropping weekend-dated returns from aggregation");
    }

    let mut out = Vec::with_capacity(DayOfWeek::TRADING.len());
    for day in DayOfWeek::TRADING {
        let values: Vec<f64> = records
            .iter()
            .filter(|r| r.weekday == day)
            .map(|r| r.daily_return)
            .collect();

        match summarize(day, &values) {
            Some(stats) => out.push(stats),
            None => debug!(weekday = day.name(), "no returns for weekday"),
        }
    }
    out
}

fn summarize(weekday: DayOfWeek, values: &[f64]) -> Option<WeekdayStats> {
    let mean_return = mean(values)?;
    let median_return = median(values)?;
    let std_dev = sample_std(values, mean_return);
    let volatility = std_dev.map(|sd| sd / (mean_return.abs() + EPSILON));

    Some(WeekdayStats {
        weekday,
        count: values.len(),
        mean_return,
        median_return,
        std_dev,
        volatility,
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (n - 1 denominator); undefined below two values.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(y: i32, m: u32, d: u32, r: f64) -> ReturnRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        ReturnRecord {
            date,
            weekday: DayOfWeek::of(date),
            daily_return: r,
        }
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn sample_std_matches_known_value() {
        // Values 2, 4, 4, 4, 5, 5, 7, 9: mean 5, sum of squares 32, sample var 32/7.
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_std(&v, 5.0).unwrap();
        assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_return_has_undefined_std_dev() {
        // 2024-01-02 is a Tuesday.
        let out = aggregate_by_weekday(&[rec(2024, 1, 2, 0.01)]);
        assert_eq!(out.len(), 1);
        let tue = &out[0];
        assert_eq!(tue.weekday, DayOfWeek::Tuesday);
        assert_eq!(tue.count, 1);
        assert!((tue.mean_return - 0.01).abs() < 1e-15);
        assert!(tue.std_dev.is_none());
        assert!(tue.volatility.is_none());
    }

    #[test]
    fn two_or_more_returns_have_non_negative_std_dev() {
        let out = aggregate_by_weekday(&[
            rec(2024, 1, 1, 0.02),
            rec(2024, 1, 8, -0.01),
            rec(2024, 1, 15, 0.005),
        ]);
        let mon = &out[0];
        assert_eq!(mon.weekday, DayOfWeek::Monday);
        assert!(mon.std_dev.unwrap() >= 0.0);
        let expected_vol = mon.std_dev.unwrap() / (mon.mean_return.abs() + EPSILON);
        assert!((mon.volatility.unwrap() - expected_vol).abs() < 1e-12);
    }

    #[test]
    fn weekend_records_are_dropped_and_missing_days_omitted() {
        // Sat 2024-01-06, Sun 2024-01-07, Wed 2024-01-03, Fri 2024-01-05.
        let out = aggregate_by_weekday(&[
            rec(2024, 1, 3, 0.01),
            rec(2024, 1, 5, 0.02),
            rec(2024, 1, 6, 0.50),
            rec(2024, 1, 7, -0.50),
        ]);
        let days: Vec<DayOfWeek> = out.iter().map(|s| s.weekday).collect();
        assert_eq!(days, vec![DayOfWeek::Wednesday, DayOfWeek::Friday]);
    }

    #[test]
    fn all_zero_returns_give_zero_volatility() {
        let out = aggregate_by_weekday(&[rec(2024, 1, 1, 0.0), rec(2024, 1, 8, 0.0)]);
        assert_eq!(out[0].std_dev, Some(0.0));
        assert_eq!(out[0].volatility, Some(0.0));
    }
}
