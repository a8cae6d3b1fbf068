//! `weekday-edge` library crate.
//!
//! The binary (`dow`) is a thin wrapper around this library so that:
//!
//! - the statistics are testable without spawning processes
//! - price sources can be swapped behind the `PriceSource` trait
//! - file output stays at the outermost boundary

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
