//! A normalized daily price series for one ticker.

use chrono::NaiveDate;

use crate::models::bar::RawBar;

/// Ordered daily bars for one ticker.
///
/// Bars are strictly ascending by date and every bar has high/low/close. The
/// series may be empty when every provider row was dropped during
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<RawBar>,
}

impl PriceSeries {
    /// Builds a series, sorting by date and keeping the first bar of any
    /// duplicated date.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<RawBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[RawBar] {
        &self.bars
    }

    pub fn into_bars(self) -> Vec<RawBar> {
        self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<Option<u64>> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// True when at least one bar carries a volume.
    pub fn has_volume(&self) -> bool {
        self.bars.iter().any(|b| b.volume.is_some())
    }
}
