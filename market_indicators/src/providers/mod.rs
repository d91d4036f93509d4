//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the narrow interface the
//! [`fetcher`](crate::fetcher) uses to pull daily bars from a market data
//! vendor. Implementations return a vendor-neutral
//! [`PriceFrame`](crate::models::frame::PriceFrame); flattening and schema
//! checks happen in the fetcher so the indicator math never depends on a
//! vendor's response shape.
//!
//! The trait is async and object safe, so a caller can pick a provider at
//! runtime behind `Box<dyn DataProvider + Send + Sync>`.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_indicators::models::{frame::PriceFrame, request_params::DailyBarsRequest};
//! use market_indicators::providers::{DataProvider, ProviderError};
//!
//! struct NoopProvider;
//!
//! #[async_trait]
//! impl DataProvider for NoopProvider {
//!     async fn fetch_daily_bars(
//!         &self,
//!         _params: DailyBarsRequest,
//!     ) -> Result<PriceFrame, ProviderError> {
//!         Ok(PriceFrame::empty())
//!     }
//! }
//! ```

pub mod yahoo;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{frame::PriceFrame, request_params::DailyBarsRequest};

/// Trait for fetching daily bars from a market data provider.
#[async_trait]
pub trait DataProvider {
    /// Fetches daily bars for the given request.
    ///
    /// # Returns
    ///
    /// * `Ok(PriceFrame)` - The provider's rows, possibly empty when the symbol
    ///   has no data in the range.
    /// * `Err(ProviderError)` - Transport, API or decoding failures.
    async fn fetch_daily_bars(
        &self,
        params: DailyBarsRequest,
    ) -> Result<PriceFrame, ProviderError>;
}

#[async_trait]
impl<P> DataProvider for Box<P>
where
    P: DataProvider + Send + Sync + ?Sized,
{
    async fn fetch_daily_bars(
        &self,
        params: DailyBarsRequest,
    ) -> Result<PriceFrame, ProviderError> {
        (**self).fetch_daily_bars(params).await
    }
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The configured base URL cannot carry the chart path.
    #[snafu(display("Invalid base URL {base_url:?}: {message}"))]
    InvalidBaseUrl {
        base_url: String,
        message: String,
        backtrace: Backtrace,
    },

    /// The configured user agent is not a valid header value.
    #[snafu(display("Invalid user agent: {source}"))]
    InvalidUserAgent {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },
}
