//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - price and return records (`PricePoint`, `ReturnRecord`)
//! - per-weekday statistics (`WeekdayStats`, `ScoreTable`)
//! - the final advice (`Recommendation`)
//! - run configuration (`AnalysisConfig`, `RunConfig`)

pub mod types;

pub use types::*;
