use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bar interval requested from a provider.
///
/// Only daily bars are fetched in this version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    Day,
}

impl Interval {
    /// The interval code used in provider query strings (e.g. `1d`).
    pub fn as_code(&self) -> &'static str {
        match self {
            Interval::Day => "1d",
        }
    }
}

/// Vendor-agnostic parameters for one daily-bars request.
///
/// This is the standard input of every
/// [`DataProvider`](crate::providers::DataProvider) implementation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyBarsRequest {
    /// Symbol to request (e.g. `"AAPL"`).
    pub symbol: String,

    /// Start of the requested range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested range (exclusive, UTC).
    pub end: DateTime<Utc>,

    /// Bar interval.
    #[serde(default)]
    pub interval: Interval,
}

impl DailyBarsRequest {
    pub fn new(symbol: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            interval: Interval::Day,
        }
    }
}
