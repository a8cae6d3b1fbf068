//! Text report and terminal summary.
//!
//! Missing statistics print as `NaN` so every weekday keeps its row.

use crate::app::pipeline::AnalysisOutput;
use crate::domain::{DayOfWeek, PricePoint, ScoreTable};

const METRIC_EXPLANATIONS: &str = "\
Metric Explanations:
- Average Return: Mean daily return by day of week
- Median Return: Median daily return by day of week
- Standard Deviation: Sample standard deviation (n-1) of daily returns on each weekday
- Volatility: Std Dev divided by abs(mean), to standardize
- Buy/Sell Score: (Median + Average Return) / Volatility
  Higher score = potentially better day to buy (stronger returns, more consistent)
";

/// Format the full report written to the `_log.txt` artifact.
pub fn format_report(output: &AnalysisOutput) -> String {
    let cfg = &output.config;
    let rec = &output.recommendation;
    let mut out = String::new();

    out.push_str(&format!("Stock Ticker: {}\n", cfg.ticker));
    out.push_str(&format!("Data Period: {}\n", cfg.period));
    out.push_str(&format!("Data Source: {}\n", output.source_name));
    out.push_str(&format!(
        "Observations: {} prices, {} daily returns\n\n",
        output.n_prices, output.n_returns
    ));

    out.push_str(METRIC_EXPLANATIONS);
    out.push('\n');

    out.push_str("=== Metrics by Day ===\n");
    out.push_str(&format_score_table(&output.table));
    out.push('\n');

    out.push_str(&format!(
        "Best Day to Buy: {} (Highest Buy/Sell Score)\n",
        rec.best_buy_day
    ));
    out.push_str(&format!("Recent {} Prices on Buy Day:\n", cfg.lookback));
    out.push_str(&format_prices(&rec.recent_buy_prices));
    out.push('\n');

    out.push_str(&format!(
        "Best Day to Sell: {} (Lowest Buy/Sell Score)\n",
        rec.best_sell_day
    ));
    out.push_str(&format!("Recent {} Prices on Sell Day:\n", cfg.lookback));
    out.push_str(&format_prices(&rec.recent_sell_prices));
    out.push('\n');

    out.push_str(&format!("Current Price: {:.4}\n", rec.current_price));
    out.push_str(&format!(
        "Recommendation Score for this week: {:.1}/10\n",
        rec.score
    ));

    out
}

/// Short terminal summary of a run.
pub fn format_summary(output: &AnalysisOutput) -> String {
    let cfg = &output.config;
    let rec = &output.recommendation;
    let mut out = String::new();

    out.push_str(&format!(
        "=== dow - Weekday Seasonality: {} ({}) ===\n",
        cfg.ticker, cfg.period
    ));
    out.push_str(&format!(
        "Source: {} | prices={} | returns={}\n\n",
        output.source_name, output.n_prices, output.n_returns
    ));
    out.push_str(&format_score_table(&output.table));
    out.push('\n');
    out.push_str(&format!("Best day to buy : {}\n", rec.best_buy_day));
    out.push_str(&format!("Best day to sell: {}\n", rec.best_sell_day));
    out.push_str(&format!("Recommendation  : {:.1}/10\n", rec.score));

    out
}

/// Monday..Friday table of per-weekday statistics.
pub fn format_score_table(table: &ScoreTable) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:>5} {:>14} {:>14} {:>18} {:>12} {:>14}",
            "Day", "N", "Average Return", "Median Return", "Standard Deviation", "Volatility", "Buy/Sell Score"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<5} {:-<14} {:-<14} {:-<18} {:-<12} {:-<14}",
            "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for day in DayOfWeek::TRADING {
        let line = match table.get(day) {
            Some(row) => format!(
                "{:<10} {:>5} {:>14} {:>14} {:>18} {:>12} {:>14}",
                day.name(),
                row.stats.count,
                fmt_num(Some(row.stats.mean_return)),
                fmt_num(Some(row.stats.median_return)),
                fmt_num(row.stats.std_dev),
                fmt_num(row.stats.volatility),
                fmt_num(row.buy_sell_score),
            ),
            None => format!(
                "{:<10} {:>5} {:>14} {:>14} {:>18} {:>12} {:>14}",
                day.name(),
                0,
                "NaN",
                "NaN",
                "NaN",
                "NaN",
                "NaN"
            ),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn format_prices(prices: &[PricePoint]) -> String {
    if prices.is_empty() {
        return "(no prices on this weekday)\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>12}\n", "Date", "Share Price"));
    for p in prices {
        out.push_str(&format!("{:<12} {:>12.4}\n", p.date.to_string(), p.price));
    }
    out
}

fn fmt_num(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.6}"),
        _ => "NaN".to_string(),
    }
}
