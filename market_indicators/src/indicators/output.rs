//! Presentation of full-precision indicator values.
//!
//! This is the last step for every indicator: keep the most recent defined
//! values, round them, and key them by date. The numeric modules never round
//! or truncate.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::indicators::CalculationError;

/// Key format of an [`IndicatorSeries`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-keyed, rounded indicator values in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(IndexMap<String, f64>);

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<f64> {
        self.0.get(date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn last(&self) -> Option<(&str, f64)> {
        self.0.last().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for IndicatorSeries {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keeps the last `max_points` defined values, rounded to `decimals`.
///
/// Truncation counts defined values by position, not calendar days, so gaps in
/// the series do not shrink the output. A defined value that is not finite
/// fails the whole indicator.
pub fn present(
    dates: &[NaiveDate],
    values: &[Option<f64>],
    max_points: usize,
    decimals: u32,
) -> Result<IndicatorSeries, CalculationError> {
    let defined: Vec<(NaiveDate, f64)> = dates
        .iter()
        .zip(values)
        .filter_map(|(date, value)| value.map(|v| (*date, v)))
        .collect();

    if let Some((date, _)) = defined.iter().find(|(_, v)| !v.is_finite()) {
        return Err(CalculationError::NonFinite { date: *date });
    }

    let start = defined.len().saturating_sub(max_points);
    Ok(defined[start..]
        .iter()
        .map(|(date, v)| (date.format(DATE_FORMAT).to_string(), round_to(*v, decimals)))
        .collect())
}

/// Rounds to the nearest `decimals`-place value of the stored `f64`.
///
/// Float formatting is correctly rounded, so `2.675` (stored just below the
/// half-way point) becomes `2.67`. Negative zero comes back as `0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let rounded = format!("{:.*}", decimals as usize, value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded == 0.0 { 0.0 } else { rounded }
}
