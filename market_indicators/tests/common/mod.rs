#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use market_indicators::{
    models::{
        bar::RawBar,
        frame::{ColumnKey, PriceFrame},
        price_series::PriceSeries,
        request_params::DailyBarsRequest,
    },
    providers::{ApiSnafu, DataProvider, ProviderError},
};

pub const FIELDS: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

/// Business days starting on Monday 2024-01-01.
pub fn trading_days(n: usize) -> Vec<NaiveDate> {
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut days = Vec::with_capacity(n);
    while days.len() < n {
        if day.weekday().number_from_monday() <= 5 {
            days.push(day);
        }
        day = day.succ_opt().unwrap();
    }
    days
}

/// Deterministic wavy closes with a slight upward drift.
pub fn closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 50.0 + (i as f64 / 3.0).sin() * 4.0 + i as f64 * 0.05)
        .collect()
}

/// Builds an OHLCV frame of `n` rows. `symbol` makes the columns multi-level;
/// `skip` leaves a field out entirely.
pub fn ohlcv_frame(n: usize, symbol: Option<&str>, skip: &[&str]) -> PriceFrame {
    let closes = closes(n);
    let mut frame = PriceFrame::new(trading_days(n));
    for field in FIELDS {
        if skip.contains(&field) {
            continue;
        }
        let values: Vec<Option<f64>> = closes
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Some(match field {
                    "Open" => c - 0.3,
                    "High" => c + 1.0,
                    "Low" => c - 1.0,
                    "Close" => *c,
                    _ => 10_000.0 + (i % 5) as f64 * 1_000.0,
                })
            })
            .collect();
        let key = match symbol {
            Some(s) => ColumnKey::with_symbol(field, s),
            None => ColumnKey::field(field),
        };
        frame.push_column(key, values).unwrap();
    }
    frame
}

pub fn series(n: usize) -> PriceSeries {
    let bars = trading_days(n)
        .into_iter()
        .zip(closes(n))
        .map(|(date, close)| RawBar {
            date,
            open: Some(close - 0.3),
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: Some(10_000),
        })
        .collect();
    PriceSeries::new("TEST", bars)
}

/// Returns a fixed frame for every request.
pub struct StaticProvider(pub PriceFrame);

#[async_trait]
impl DataProvider for StaticProvider {
    async fn fetch_daily_bars(
        &self,
        _params: DailyBarsRequest,
    ) -> Result<PriceFrame, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Fails every request with an API error.
pub struct FailingProvider;

#[async_trait]
impl DataProvider for FailingProvider {
    async fn fetch_daily_bars(
        &self,
        params: DailyBarsRequest,
    ) -> Result<PriceFrame, ProviderError> {
        ApiSnafu {
            message: format!("service unavailable for {}", params.symbol),
        }
        .fail()
    }
}

/// Sleeps before answering with an empty frame.
pub struct SlowProvider(pub Duration);

#[async_trait]
impl DataProvider for SlowProvider {
    async fn fetch_daily_bars(
        &self,
        _params: DailyBarsRequest,
    ) -> Result<PriceFrame, ProviderError> {
        tokio::time::sleep(self.0).await;
        Ok(PriceFrame::empty())
    }
}
