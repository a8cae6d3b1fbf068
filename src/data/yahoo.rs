//! Yahoo Finance chart API integration (daily closes).

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::{PriceSource, normalize_series};
use crate::domain::PricePoint;
use crate::error::{AppError, EXIT_INTERNAL};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = "Mozilla/5.0";

pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Build a client, honouring `YAHOO_CHART_URL` and `YAHOO_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = std::env::var("YAHOO_CHART_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_timeout(std::env::var("YAHOO_TIMEOUT_SECS").ok().as_deref());

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn url(&self, ticker: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ticker)
    }
}

impl PriceSource for YahooClient {
    fn source_name(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn fetch(&self, ticker: &str, period: &str) -> Result<Vec<PricePoint>, AppError> {
        let url = self.url(ticker);
        debug!(%url, period, "requesting daily chart");

        let resp = self
            .client
            .get(&url)
            .query(&[("range", period), ("interval", "1d"), ("events", "div,split")])
            .send()
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Yahoo Finance request failed: {e}")))?;

        let status = resp.status();

        // Unknown symbols come back as 404 with an error body; that is "no data".
        if status == StatusCode::NOT_FOUND {
            warn!(ticker, period, "Yahoo Finance returned 404");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(AppError::new(
                EXIT_INTERNAL,
                format!("Yahoo Finance request failed with status {status}."),
            ));
        }

        let body: ChartResponse = resp
            .json()
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to parse Yahoo Finance response: {e}")))?;
        let points = parse_chart(body)?;
        debug!(n = points.len(), "parsed daily closes");
        Ok(points)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

/// Turn a chart payload into a normalized close series.
///
/// One price column is used for the whole series: adjusted closes when the
/// payload carries them, raw closes otherwise. Rows where that column is
/// null are skipped.
fn parse_chart(body: ChartResponse) -> Result<Vec<PricePoint>, AppError> {
    if let Some(err) = body.chart.error {
        if err.code.eq_ignore_ascii_case("Not Found") || err.description.contains("No data") {
            return Ok(Vec::new());
        }
        return Err(AppError::new(
            EXIT_INTERNAL,
            format!("Yahoo Finance error: {} - {}", err.code, err.description),
        ));
    }

    let Some(data) = body.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let Some(timestamps) = data.timestamp else {
        return Ok(Vec::new());
    };

    let adjusted = data
        .indicators
        .adjclose
        .and_then(|a| a.into_iter().next())
        .map(|a| a.adjclose)
        .filter(|a| !a.is_empty());
    let prices = match adjusted {
        Some(adjusted) => adjusted,
        None => {
            debug!("no adjusted closes in payload, using raw closes");
            data.indicators.quote.into_iter().next().map(|q| q.close).unwrap_or_default()
        }
    };

    let mut out = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(price) = prices.get(i).copied().flatten() else {
            continue;
        };
        let Some(date) = exchange_date(ts, data.meta.gmtoffset) else {
            continue;
        };
        out.push(PricePoint::new(date, price));
    }

    Ok(normalize_series(out))
}

fn parse_timeout(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_TIMEOUT_SECS;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(value = raw, default = DEFAULT_TIMEOUT_SECS, "ignoring invalid YAHOO_TIMEOUT_SECS");
        DEFAULT_TIMEOUT_SECS
    })
}

/// Calendar date of a Unix timestamp in the exchange's time zone.
fn exchange_date(ts: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts.checked_add(gmtoffset)?, 0).map(|dt| dt.date_naive())
}
