//! The `get_stock_prices` tool: fetch a ticker's daily bars and attach the
//! indicator report.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::Config,
    errors::FetchError,
    fetcher::PriceFetcher,
    indicators::{IndicatorEngine, IndicatorResult},
    models::bar::RawBar,
    providers::{DataProvider, yahoo::YahooProvider},
};

/// Tool output: the full report, or one user-facing failure string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Success(StockReport),
    Failure(String),
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }

    pub fn report(&self) -> Option<&StockReport> {
        match self {
            ToolResult::Success(report) => Some(report),
            ToolResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ToolResult::Success(_) => None,
            ToolResult::Failure(message) => Some(message),
        }
    }
}

/// Every fetched bar plus the indicator outcomes computed over them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    pub stock_price: Vec<RawBar>,
    pub indicators: IndicatorResult,
}

pub struct StockPriceTool<P> {
    fetcher: PriceFetcher<P>,
    engine: IndicatorEngine,
}

impl<P> StockPriceTool<P>
where
    P: DataProvider + Send + Sync,
{
    pub fn new(provider: P, engine: IndicatorEngine) -> Self {
        Self {
            fetcher: PriceFetcher::new(provider),
            engine,
        }
    }

    /// Builds the tool around `provider` with the engine parameters and the
    /// fetch deadline taken from `config`.
    pub fn with_config(provider: P, config: &Config) -> Self {
        Self {
            fetcher: PriceFetcher::new(provider)
                .with_deadline(config.fetch.timeout_secs.map(Duration::from_secs)),
            engine: IndicatorEngine::new(config.indicators.clone()),
        }
    }

    pub fn fetcher(&self) -> &PriceFetcher<P> {
        &self.fetcher
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    pub async fn get_stock_prices(&self, ticker: &str) -> ToolResult {
        match self.fetcher.fetch(ticker).await {
            Ok(series) => {
                let indicators = self.engine.compute(&series);
                info!(ticker, bars = series.len(), "price report ready");
                ToolResult::Success(StockReport {
                    stock_price: series.into_bars(),
                    indicators,
                })
            }
            Err(err) => {
                warn!(ticker, error = %err, "price fetch failed");
                ToolResult::Failure(err.describe())
            }
        }
    }
}

/// Fetches `ticker` from Yahoo Finance with the configuration named by
/// `MARKET_INDICATORS_CONFIG` (or the defaults).
///
/// Never panics and never returns an error: failures come back as
/// [`ToolResult::Failure`].
pub async fn get_stock_prices(ticker: &str) -> ToolResult {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "configuration could not be loaded");
            return ToolResult::Failure(format!("Error fetching price data: {err}"));
        }
    };
    match YahooProvider::with_config(&config.provider) {
        Ok(provider) => StockPriceTool::with_config(provider, &config)
            .get_stock_prices(ticker)
            .await,
        Err(err) => ToolResult::Failure(FetchError::from(err).describe()),
    }
}
