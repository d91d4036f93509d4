//! Canonical in-memory representation of one trading day (OHLCV).
//!
//! Bars are produced by the [`fetcher`](crate::fetcher) from a provider
//! [`PriceFrame`](crate::models::frame::PriceFrame) and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily bar.
///
/// `high`, `low` and `close` are always present; rows missing any of them are
/// dropped during normalization. Serializes as one row of the `stock_price`
/// table, with the date rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Trading day.
    pub date: NaiveDate,

    /// Opening price. Not every provider row carries one.
    pub open: Option<f64>,

    /// Highest price of the day.
    pub high: f64,

    /// Lowest price of the day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded. Absent when the provider has no volume for the day.
    pub volume: Option<u64>,
}

impl RawBar {
    /// Typical price, `(high + low + close) / 3`.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}
