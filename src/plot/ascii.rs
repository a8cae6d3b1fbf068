//! ASCII bars of the buy/sell score per weekday.
//!
//! Positive scores draw with `#`, negative with `=`, scaled to the largest
//! absolute score. Deterministic output, handy for a quick terminal read.

use crate::domain::{DayOfWeek, ScoreTable};

/// Render one bar per trading weekday, at most `width` characters long.
pub fn render_score_bars(table: &ScoreTable, width: usize) -> String {
    let width = width.max(10);
    let scores: Vec<(DayOfWeek, Option<f64>)> = DayOfWeek::TRADING
        .iter()
        .map(|&d| (d, table.get(d).and_then(|r| r.buy_sell_score)))
        .collect();

    let max_abs = scores
        .iter()
        .filter_map(|(_, s)| *s)
        .fold(0.0_f64, |acc, s| acc.max(s.abs()));

    let mut out = String::from("Buy/Sell Score by weekday\n");
    for (day, score) in scores {
        let line = match score {
            Some(s) => {
                let len = if max_abs > 0.0 {
                    ((s.abs() / max_abs) * width as f64).round() as usize
                } else {
                    0
                };
                let ch = if s < 0.0 { '=' } else { '#' };
                format!("{:<10} |{} {s:+.4}", day.name(), ch.to_string().repeat(len))
            }
            None => format!("{:<10} | (n/a)", day.name()),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}
