//! Reporting: the text report, terminal summary, and chart-ready scaling.

pub mod format;
pub mod normalize;

pub use format::{format_report, format_score_table, format_summary};
pub use normalize::{METRIC_NAMES, NormalizedRow, normalize_for_chart};
