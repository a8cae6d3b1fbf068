//! Synthetic business-day price series.
//!
//! Prices follow a geometric random walk seeded from the ticker and a user
//! seed, so the same inputs always give the same series. Useful for offline
//! runs and demos where no market data is reachable.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::{PriceSource, normalize_series};
use crate::domain::{DayOfWeek, PricePoint};
use crate::error::{AppError, EXIT_USAGE};

const START_PRICE: f64 = 100.0;
/// Daily drift of log price.
const DRIFT: f64 = 0.0003;
/// Daily standard deviation of log price.
const DAILY_VOL: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct SampleSource {
    seed: u64,
    /// Calendar span used for `max` or unrecognized periods.
    default_days: usize,
    end: NaiveDate,
}

impl SampleSource {
    pub fn new(seed: u64, default_days: usize, end: NaiveDate) -> Self {
        Self {
            seed,
            default_days,
            end,
        }
    }

    fn seed_for(&self, ticker: &str, period: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        ticker.hash(&mut hasher);
        period.hash(&mut hasher);
        self.end.hash(&mut hasher);
        hasher.finish()
    }
}

impl PriceSource for SampleSource {
    fn source_name(&self) -> &'static str {
        "Synthetic sample"
    }

    fn fetch(&self, ticker: &str, period: &str) -> Result<Vec<PricePoint>, AppError> {
        let days = period_days(period, self.end).unwrap_or(self.default_days as i64);

        let mut rng = StdRng::seed_from_u64(self.seed_for(ticker, period));
        let normal = Normal::new(DRIFT - 0.5 * DAILY_VOL * DAILY_VOL, DAILY_VOL)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Noise distribution error: {e}")))?;

        let start = Duration::try_days(days)
            .and_then(|span| self.end.checked_sub_signed(span))
            .ok_or_else(|| AppError::new(EXIT_USAGE, format!("Period '{period}' is out of range.")))?;
        let mut price = START_PRICE;
        let mut out = Vec::new();
        let mut date = start;
        while date <= self.end {
            if !DayOfWeek::of(date).is_weekend() {
                out.push(PricePoint::new(date, price));
                price *= normal.sample(&mut rng).exp();
            }
            date += Duration::days(1);
        }

        Ok(normalize_series(out))
    }
}

/// Calendar days covered by a Yahoo-style period specifier.
///
/// Understands `Nd`, `Nwk`, `Nmo`, `Ny`, and `ytd`. Returns `None` for `max`
/// and anything else, leaving the choice to the caller.
pub fn period_days(period: &str, end: NaiveDate) -> Option<i64> {
    let p = period.trim().to_ascii_lowercase();
    if p == "ytd" {
        let jan1 = NaiveDate::from_ymd_opt(chrono::Datelike::year(&end), 1, 1)?;
        return Some((end - jan1).num_days());
    }

    let split = p.find(|c: char| !c.is_ascii_digit())?;
    let (num, unit) = p.split_at(split);
    let n: i64 = num.parse().ok()?;
    let per_unit = match unit {
        "d" => 1,
        "wk" => 7,
        "mo" => 30,
        "y" => 365,
        _ => return None,
    };
    n.checked_mul(per_unit)
}
