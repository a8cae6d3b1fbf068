//! Artifact file naming.
//!
//! Names are keyed by ticker, period, and a wall-clock timestamp so repeated
//! runs never overwrite each other. The clock is injected so tests can pin it.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

/// `Jun-13-2025_04-05-06_PM`
pub const TIMESTAMP_FORMAT: &str = "%b-%d-%Y_%I-%M-%S_%p";

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// `{TICKER}_{period}_{timestamp}`
pub fn artifact_stem(ticker: &str, period: &str, at: NaiveDateTime) -> String {
    format!("{}_{}_{}", sanitize(ticker), sanitize(period), at.format(TIMESTAMP_FORMAT))
}

/// Paths of every artifact a run may write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub chart: PathBuf,
    pub report: PathBuf,
    pub json: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, ticker: &str, period: &str, clock: &dyn Clock) -> Self {
        let stem = artifact_stem(ticker, period, clock.now());
        Self {
            chart: dir.join(format!("{stem}_metrics.svg")),
            report: dir.join(format!("{stem}_log.txt")),
            json: dir.join(format!("{stem}_result.json")),
        }
    }
}

// Keep user-supplied fragments from escaping the output directory.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}
