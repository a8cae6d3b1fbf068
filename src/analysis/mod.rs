//! The statistical core.
//!
//! Data flows strictly left to right:
//! prices -> returns (`returns`) -> weekday aggregates (`weekday`) -> scores (`score`)
//!
//! Everything in here is a pure function of its inputs: no I/O, no clock.

pub mod returns;
pub mod score;
pub mod weekday;

pub use returns::compute_returns;
pub use score::{build_score_table, recent_prices, recommend, recommendation_score, select_best_days};
pub use weekday::aggregate_by_weekday;
