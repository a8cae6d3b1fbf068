//! Daily simple returns labelled by weekday.

use crate::domain::{DayOfWeek, PricePoint, ReturnRecord};
use crate::error::AnalysisError;

/// Compute `(p[i] - p[i-1]) / p[i-1]` for every point after the first.
///
/// The series must already be chronological with positive prices (both price
/// sources normalize their output that way). A single point yields no records.
pub fn compute_returns(series: &[PricePoint]) -> Result<Vec<ReturnRecord>, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let records = series
        .windows(2)
        .map(|w| {
            let (prev, curr) = (w[0], w[1]);
            ReturnRecord {
                date: curr.date,
                weekday: DayOfWeek::of(curr.date),
                daily_return: (curr.price - prev.price) / prev.price,
            }
        })
        .collect();

    Ok(records)
}
