use crate::{
    models::request_params::DailyBarsRequest,
    providers::{ProviderError, ValidationSnafu},
};

/// Rejects requests the chart endpoint cannot answer.
pub fn validate_request(params: &DailyBarsRequest) -> Result<(), ProviderError> {
    if params.symbol.trim().is_empty() {
        return ValidationSnafu {
            message: "ticker symbol is empty",
        }
        .fail();
    }
    if params.start >= params.end {
        return ValidationSnafu {
            message: format!(
                "start {} is not before end {}",
                params.start.to_rfc3339(),
                params.end.to_rfc3339()
            ),
        }
        .fail();
    }
    Ok(())
}

/// Builds the chart query string.
pub fn construct_params(params: &DailyBarsRequest) -> Vec<(String, String)> {
    vec![
        ("period1".to_string(), params.start.timestamp().to_string()),
        ("period2".to_string(), params.end.timestamp().to_string()),
        ("interval".to_string(), params.interval.as_code().to_string()),
        ("includePrePost".to_string(), "false".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn query_uses_unix_seconds_and_daily_interval() {
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let params = DailyBarsRequest::new("AAPL", end - Duration::days(1), end);

        let query = construct_params(&params);
        assert_eq!(query[0], ("period1".to_string(), "1717113600".to_string()));
        assert_eq!(query[1], ("period2".to_string(), "1717200000".to_string()));
        assert_eq!(query[2], ("interval".to_string(), "1d".to_string()));
    }

    #[test]
    fn rejects_blank_symbol_and_inverted_range() {
        let now = Utc::now();
        let blank = DailyBarsRequest::new("  ", now - Duration::days(1), now);
        assert!(matches!(
            validate_request(&blank),
            Err(ProviderError::Validation { .. })
        ));

        let inverted = DailyBarsRequest::new("AAPL", now, now - Duration::days(1));
        assert!(matches!(
            validate_request(&inverted),
            Err(ProviderError::Validation { .. })
        ));
    }
}
