//! Daily price history and technical indicators for a single ticker.
//!
//! [`get_stock_prices`] fetches the trailing 24 weeks of daily bars through a
//! [`DataProvider`](providers::DataProvider) and reports RSI, the stochastic
//! oscillator, MACD with its signal line, and VWAP alongside the bars.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod indicators;
pub mod models;
pub mod providers;
pub mod tool;

pub use config::Config;
pub use errors::FetchError;
pub use indicators::{IndicatorEngine, IndicatorParams, IndicatorResult};
pub use tool::{StockPriceTool, StockReport, ToolResult, get_stock_prices};
