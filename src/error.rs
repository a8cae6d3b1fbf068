//! Error types.
//!
//! - `AnalysisError`: failures of the statistical pipeline itself
//! - `AppError`: what the binary reports, carrying the process exit code
//!
//! Exit codes:
//! - `1`: the price source returned no data
//! - `2`: usage, configuration, or file I/O problems
//! - `3`: not enough data to score any weekday
//! - `4`: data source failures and internal guards

/// Exit code for "the source returned nothing for this ticker/period".
pub const EXIT_NO_DATA: u8 = 1;
/// Exit code for usage/config/file errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when no weekday has usable statistics.
pub const EXIT_INSUFFICIENT: u8 = 3;
/// Exit code for data source and internal failures.
pub const EXIT_INTERNAL: u8 = 4;

/// Errors raised by the return/aggregation/scoring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("No data found for {ticker} with period '{period}'. Please check the ticker or try a different period.")]
    NoData { ticker: String, period: String },

    #[error("Cannot compute returns from an empty price series.")]
    EmptySeries,

    #[error(
        "Insufficient data: no weekday has at least two daily returns, so no buy/sell score can be computed. Try a longer period."
    )]
    InsufficientData,
}

impl AnalysisError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::NoData { .. } => EXIT_NO_DATA,
            AnalysisError::InsufficientData => EXIT_INSUFFICIENT,
            AnalysisError::EmptySeries => EXIT_INTERNAL,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
