//! Price series fetcher.
//!
//! [`PriceFetcher`] asks a [`DataProvider`] for the trailing
//! [`LOOKBACK_WEEKS`] of daily bars and [`normalize`]s the returned frame:
//!
//! 1. An empty frame is a [`FetchError::NoData`].
//! 2. Multi-level `(field, symbol)` columns are flattened to field names.
//! 3. High/Low/Close must all be present, otherwise [`FetchError::Schema`]
//!    names the missing and the available columns.
//! 4. Rows missing any of high/low/close are dropped; the rest become
//!    [`RawBar`]s sorted by date.
//!
//! No retries and no caching: every call goes to the provider once.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    errors::FetchError,
    models::{
        bar::RawBar, frame::PriceFrame, price_series::PriceSeries,
        request_params::DailyBarsRequest,
    },
    providers::DataProvider,
};

/// Length of the fetched window, ending now.
pub const LOOKBACK_WEEKS: i64 = 24;

pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const OPEN: &str = "Open";
pub const VOLUME: &str = "Volume";

/// Columns every frame must carry after flattening.
pub const REQUIRED_COLUMNS: [&str; 3] = [HIGH, LOW, CLOSE];

pub struct PriceFetcher<P> {
    provider: P,
    deadline: Option<Duration>,
}

impl<P> PriceFetcher<P>
where
    P: DataProvider + Send + Sync,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            deadline: None,
        }
    }

    /// Bounds the provider call; `None` waits for as long as the provider does.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Fetches the window ending at the current wall-clock time.
    pub async fn fetch(&self, ticker: &str) -> Result<PriceSeries, FetchError> {
        self.fetch_at(ticker, Utc::now()).await
    }

    /// Fetches the [`LOOKBACK_WEEKS`] window ending at `now`.
    pub async fn fetch_at(
        &self,
        ticker: &str,
        now: DateTime<Utc>,
    ) -> Result<PriceSeries, FetchError> {
        let request = DailyBarsRequest::new(
            ticker,
            now - chrono::Duration::weeks(LOOKBACK_WEEKS),
            now,
        );
        info!(
            ticker,
            start = %request.start.date_naive(),
            end = %request.end.date_naive(),
            "fetching daily bars"
        );

        let call = self.provider.fetch_daily_bars(request);
        let frame = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .map_err(|_| FetchError::Timeout(deadline))??,
            None => call.await?,
        };

        normalize(ticker, frame)
    }
}

/// Turns a provider frame into a [`PriceSeries`].
pub fn normalize(ticker: &str, frame: PriceFrame) -> Result<PriceSeries, FetchError> {
    if frame.is_empty() {
        return Err(FetchError::NoData {
            ticker: ticker.to_string(),
        });
    }

    let frame = if frame.is_multi_level() {
        debug!(ticker, "flattening multi-level columns");
        frame.flatten()
    } else {
        frame
    };

    let (Some(high), Some(low), Some(close)) =
        (frame.column(HIGH), frame.column(LOW), frame.column(CLOSE))
    else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !frame.has_column(c))
            .map(ToString::to_string)
            .collect();
        return Err(FetchError::Schema {
            missing,
            available: frame.column_names(),
        });
    };
    let open = frame.column(OPEN);
    let volume = frame.column(VOLUME);

    let mut bars = Vec::with_capacity(frame.len());
    let mut dropped = 0usize;
    for (i, &date) in frame.index().iter().enumerate() {
        let (Some(high), Some(low), Some(close)) =
            (finite(high[i]), finite(low[i]), finite(close[i]))
        else {
            dropped += 1;
            continue;
        };
        bars.push(RawBar {
            date,
            open: open.and_then(|col| finite(col[i])),
            high,
            low,
            close,
            volume: volume.and_then(|col| shares(col[i])),
        });
    }

    if dropped > 0 {
        warn!(ticker, dropped, kept = bars.len(), "dropped rows missing high/low/close");
    }
    Ok(PriceSeries::new(ticker, bars))
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn shares(value: Option<f64>) -> Option<u64> {
    finite(value).filter(|v| *v >= 0.0).map(|v| v.round() as u64)
}
