use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    config::ProviderConfig,
    models::{frame::PriceFrame, request_params::DailyBarsRequest},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InternalSnafu, InvalidBaseUrlSnafu,
        InvalidUserAgentSnafu, ProviderError, ProviderInitError, ReqwestSnafu,
        yahoo::{
            params::{construct_params, validate_request},
            response::ChartEnvelope,
        },
    },
};

const CHART_PATH: [&str; 3] = ["v8", "finance", "chart"];

/// Daily bars from the Yahoo Finance chart endpoint. No credentials needed.
pub struct YahooProvider {
    client: Client,
    base_url: Url,
}

impl YahooProvider {
    /// Creates a provider with the default endpoint and timeouts.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_config(&ProviderConfig::default())
    }

    pub fn with_config(config: &ProviderConfig) -> Result<Self, ProviderInitError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent).context(InvalidUserAgentSnafu)?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context(ClientBuildSnafu)?;

        Ok(Self { client, base_url })
    }

    /// Appends the chart path and the symbol as percent-encoded path segments,
    /// so a symbol can never add a query, a fragment or another path.
    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(CHART_PATH).push(symbol.trim());
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ProviderInitError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        InvalidBaseUrlSnafu {
            base_url: raw,
            message: e.to_string(),
        }
        .build()
    })?;
    if url.cannot_be_a_base() {
        return InvalidBaseUrlSnafu {
            base_url: raw,
            message: "URL cannot carry a path",
        }
        .fail();
    }
    Ok(url)
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_daily_bars(
        &self,
        params: DailyBarsRequest,
    ) -> Result<PriceFrame, ProviderError> {
        validate_request(&params)?;

        let url = self.chart_url(&params.symbol);
        debug!(%url, symbol = %params.symbol, "requesting chart");

        let response = self
            .client
            .get(url)
            .query(&construct_params(&params))
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        // Unknown symbols come back as 404 with a chart error body, so decode
        // before looking at the status.
        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return InternalSnafu {
                    message: format!("failed to decode chart response: {e}"),
                }
                .fail();
            }
            Err(_) => {
                return ApiSnafu {
                    message: format!("HTTP {status}: {body}"),
                }
                .fail();
            }
        };

        let frame = envelope.into_frame()?;
        debug!(rows = frame.len(), symbol = %params.symbol, "chart decoded");
        Ok(frame)
    }
}
