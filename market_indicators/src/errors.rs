use std::time::Duration;

use thiserror::Error;

use crate::providers::{ProviderError, ProviderInitError};

/// Whole-fetch failures. Any of these short-circuits before indicators run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider returned no rows for the ticker.
    #[error("No data found for ticker '{ticker}'.")]
    NoData { ticker: String },

    /// High/Low/Close are not all present as named columns.
    #[error(
        "Required columns {missing:?} are missing. Available columns: {available:?}"
    )]
    Schema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// The provider call did not finish before the configured deadline.
    #[error("provider call timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    ProviderInit(#[from] ProviderInitError),
}

impl FetchError {
    /// The user-facing descriptor returned at the tool boundary.
    ///
    /// "No data" and schema failures are reported as they are; anything else
    /// is wrapped as a generic fetch error.
    pub fn describe(&self) -> String {
        match self {
            FetchError::NoData { .. } | FetchError::Schema { .. } => self.to_string(),
            other => format!("Error fetching price data: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_names_the_ticker() {
        let err = FetchError::NoData {
            ticker: "ZZZZ".into(),
        };
        assert_eq!(err.describe(), "No data found for ticker 'ZZZZ'.");
    }

    #[test]
    fn schema_failure_lists_missing_and_available() {
        let err = FetchError::Schema {
            missing: vec!["High".into()],
            available: vec!["Date".into(), "Low".into(), "Close".into()],
        };
        assert_eq!(
            err.describe(),
            r#"Required columns ["High"] are missing. Available columns: ["Date", "Low", "Close"]"#
        );
    }

    #[test]
    fn other_failures_are_wrapped() {
        let err = FetchError::Timeout(Duration::from_secs(3));
        assert_eq!(
            err.describe(),
            "Error fetching price data: provider call timed out after 3s"
        );
    }
}
