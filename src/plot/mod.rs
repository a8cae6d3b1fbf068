//! Charts.
//!
//! - SVG grouped bar chart artifact (`chart`)
//! - ASCII buy/sell score bars for the terminal (`ascii`)

pub mod ascii;
pub mod chart;

pub use ascii::render_score_bars;
pub use chart::write_metrics_chart;
