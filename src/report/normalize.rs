//! Display-only min-max scaling of the score table.
//!
//! Each metric column is scaled to `[0, 1]` across the weekdays where it is
//! defined. Raw values in the table are never touched. A column whose max
//! equals its min has no meaningful scale, so every cell in it is `None`.

use crate::domain::{DayOfWeek, ScoreTable};

/// Chart columns, in legend order.
pub const METRIC_NAMES: [&str; 5] = [
    "Average Return",
    "Median Return",
    "Standard Deviation",
    "Volatility",
    "Buy/Sell Score",
];

/// Normalized metrics for one weekday.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub weekday: DayOfWeek,
    /// One entry per `METRIC_NAMES`; `None` renders no bar.
    pub values: [Option<f64>; 5],
}

/// Scale every metric column to `[0, 1]`, Monday..Friday.
pub fn normalize_for_chart(table: &ScoreTable) -> Vec<NormalizedRow> {
    let raw: Vec<(DayOfWeek, [Option<f64>; 5])> = DayOfWeek::TRADING
        .iter()
        .map(|&day| {
            let values = table
                .get(day)
                .map(|r| {
                    [
                        Some(r.stats.mean_return),
                        Some(r.stats.median_return),
                        r.stats.std_dev,
                        r.stats.volatility,
                        r.buy_sell_score,
                    ]
                })
                .unwrap_or([None; 5]);
            (day, values)
        })
        .collect();

    let mut bounds = [None::<(f64, f64)>; 5];
    for (col, bound) in bounds.iter_mut().enumerate() {
        for (_, values) in &raw {
            let Some(v) = values[col].filter(|v| v.is_finite()) else {
                continue;
            };
            *bound = Some(match *bound {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
    }

    raw.into_iter()
        .map(|(weekday, values)| {
            let mut scaled = [None; 5];
            for col in 0..5 {
                scaled[col] = match (values[col], bounds[col]) {
                    (Some(v), Some((lo, hi))) if v.is_finite() && hi > lo => Some((v - lo) / (hi - lo)),
                    _ => None,
                };
            }
            NormalizedRow {
                weekday,
                values: scaled,
            }
        })
        .collect()
}
