use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::{
    models::frame::{ColumnKey, PriceFrame},
    providers::{ApiSnafu, InternalSnafu, ProviderError},
};

/// Chart error code Yahoo uses for unknown or delisted symbols.
const NOT_FOUND: &str = "Not Found";

#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    pub symbol: String,
    /// Exchange offset from UTC in seconds; timestamps mark the session open.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Deserialize, Debug)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Quote {
    pub open: Option<Vec<Option<f64>>>,
    pub high: Option<Vec<Option<f64>>>,
    pub low: Option<Vec<Option<f64>>>,
    pub close: Option<Vec<Option<f64>>>,
    pub volume: Option<Vec<Option<f64>>>,
}

impl ChartEnvelope {
    /// Converts the chart payload into a frame keyed by `(field, symbol)`.
    ///
    /// A "Not Found" chart error and a missing result both map to an empty
    /// frame, so unknown tickers surface as "no data" rather than API errors.
    pub fn into_frame(self) -> Result<PriceFrame, ProviderError> {
        if let Some(err) = self.chart.error {
            if err.code == NOT_FOUND {
                return Ok(PriceFrame::empty());
            }
            return ApiSnafu {
                message: format!("{}: {}", err.code, err.description),
            }
            .fail();
        }

        match self.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => result.into_frame(),
            None => Ok(PriceFrame::empty()),
        }
    }
}

impl ChartResult {
    fn into_frame(self) -> Result<PriceFrame, ProviderError> {
        let offset = self.meta.gmtoffset;
        let index = self
            .timestamp
            .iter()
            .map(|&ts| session_date(ts, offset))
            .collect::<Result<Vec<_>, _>>()?;

        let symbol = self.meta.symbol;
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        let mut frame = PriceFrame::new(index);
        let columns = [
            ("Open", quote.open),
            ("High", quote.high),
            ("Low", quote.low),
            ("Close", quote.close),
            ("Volume", quote.volume),
        ];
        for (field, values) in columns {
            let Some(values) = values else { continue };
            frame
                .push_column(ColumnKey::with_symbol(field, symbol.as_str()), values)
                .map_err(|e| {
                    InternalSnafu {
                        message: e.to_string(),
                    }
                    .build()
                })?;
        }
        Ok(frame)
    }
}

fn session_date(timestamp: i64, gmtoffset: i64) -> Result<NaiveDate, ProviderError> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| {
            InternalSnafu {
                message: format!("timestamp {timestamp} is out of range"),
            }
            .build()
        })
}
