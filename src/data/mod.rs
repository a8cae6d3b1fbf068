//! Daily price sources.
//!
//! - Yahoo Finance chart API (`yahoo`)
//! - deterministic synthetic prices for offline runs (`sample`)
//!
//! Every source hands back a normalized series (see `normalize_series`); an
//! empty series means "no data for this ticker/period" and is not an error.

use crate::domain::PricePoint;
use crate::error::AppError;

pub mod sample;
pub mod yahoo;

pub use sample::SampleSource;
pub use yahoo::YahooClient;

/// Supplies a chronological closing-price series for a ticker and period.
pub trait PriceSource {
    fn source_name(&self) -> &'static str;

    fn fetch(&self, ticker: &str, period: &str) -> Result<Vec<PricePoint>, AppError>;
}

/// Sort by date, keep the last price per date, drop non-finite or
/// non-positive prices.
pub fn normalize_series(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    points.retain(|p| p.price.is_finite() && p.price > 0.0);
    // Stable sort keeps input order within a date, so `last wins` below is well defined.
    points.sort_by_key(|p| p.date);

    let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
    for p in points {
        match out.last_mut() {
            Some(last) if last.date == p.date => *last = p,
            _ => out.push(p),
        }
    }
    out
}
