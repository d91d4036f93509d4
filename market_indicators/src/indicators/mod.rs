//! Indicator engine.
//!
//! [`IndicatorEngine::compute`] turns a [`PriceSeries`] into an
//! [`IndicatorResult`] holding five independent outcomes: RSI, the stochastic
//! oscillator, the MACD line, the MACD signal line, and VWAP. Each outcome is
//! a `Result`, so one indicator failing (too few bars, a non-finite value)
//! never hides the others, and `compute` itself has no error path.
//!
//! The numeric modules ([`rsi`], [`stochastic`], [`macd`], [`vwap`]) work at
//! full precision over aligned `Vec<Option<f64>>` values; rounding and
//! truncation happen once, in [`output::present`].

pub mod ema;
pub mod macd;
pub mod output;
pub mod rsi;
pub mod stochastic;
pub mod vwap;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::price_series::PriceSeries;

pub use output::IndicatorSeries;

/// Why a single indicator could not be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("need at least {required} data points, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("non-finite value on {date}")]
    NonFinite { date: NaiveDate },
}

/// Failure descriptor stored in place of an indicator's series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// The series carries no volume, so VWAP is not attempted.
    #[error("Volume data not available")]
    VolumeUnavailable,

    #[error("Error calculating {kind}: {cause}")]
    Calculation {
        kind: IndicatorKind,
        cause: CalculationError,
    },
}

pub type IndicatorOutcome = Result<IndicatorSeries, IndicatorError>;

/// The five reported indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Rsi,
    StochasticOscillator,
    Macd,
    MacdSignal,
    Vwap,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::StochasticOscillator,
        IndicatorKind::Macd,
        IndicatorKind::MacdSignal,
        IndicatorKind::Vwap,
    ];

    /// Key of this indicator in the serialized result.
    pub fn key(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::StochasticOscillator => "Stochastic_Oscillator",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::MacdSignal => "MACD_Signal",
            IndicatorKind::Vwap => "vwap",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::StochasticOscillator => "Stochastic Oscillator",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::MacdSignal => "MACD Signal",
            IndicatorKind::Vwap => "VWAP",
        })
    }
}

/// Windows and output policy for the engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    pub rsi_window: usize,
    pub stochastic_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Rolling VWAP window; `None` means cumulative over the whole series.
    pub vwap_window: Option<usize>,
    /// Number of most recent values kept per indicator.
    pub max_points: usize,
    /// Decimal places of every reported value.
    pub decimals: u32,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            stochastic_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            vwap_window: None,
            max_points: 12,
            decimals: 2,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), CalculationError> {
        let windows = [
            ("rsi_window", self.rsi_window),
            ("stochastic_window", self.stochastic_window),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("vwap_window", self.vwap_window.unwrap_or(1)),
            ("max_points", self.max_points),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, v)| *v == 0) {
            return Err(CalculationError::InvalidParameter(format!(
                "{name} must be at least 1"
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(CalculationError::InvalidParameter(format!(
                "macd_fast ({}) must be shorter than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.decimals > 10 {
            return Err(CalculationError::InvalidParameter(format!(
                "decimals must be at most 10, got {}",
                self.decimals
            )));
        }
        Ok(())
    }
}

/// Outcome of every indicator for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorResult {
    pub rsi: IndicatorOutcome,
    pub stochastic_oscillator: IndicatorOutcome,
    pub macd: IndicatorOutcome,
    pub macd_signal: IndicatorOutcome,
    pub vwap: IndicatorOutcome,
}

impl IndicatorResult {
    pub fn get(&self, kind: IndicatorKind) -> &IndicatorOutcome {
        match kind {
            IndicatorKind::Rsi => &self.rsi,
            IndicatorKind::StochasticOscillator => &self.stochastic_oscillator,
            IndicatorKind::Macd => &self.macd,
            IndicatorKind::MacdSignal => &self.macd_signal,
            IndicatorKind::Vwap => &self.vwap,
        }
    }

    /// Outcomes in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKind, &IndicatorOutcome)> {
        IndicatorKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// A series serializes as a date map, a failure as its descriptor string.
impl Serialize for IndicatorResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(IndicatorKind::ALL.len()))?;
        for (kind, outcome) in self.iter() {
            match outcome {
                Ok(series) => map.serialize_entry(kind.key(), series)?,
                Err(err) => map.serialize_entry(kind.key(), &err.to_string())?,
            }
        }
        map.end()
    }
}

/// Stateless indicator calculator.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    params: IndicatorParams,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Computes every indicator over `series`. Never fails as a whole.
    pub fn compute(&self, series: &PriceSeries) -> IndicatorResult {
        let p = &self.params;
        let dates = series.dates();
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();

        let rsi = self.finish(IndicatorKind::Rsi, &dates, rsi::rsi(&closes, p.rsi_window));

        let stochastic_oscillator = self.finish(
            IndicatorKind::StochasticOscillator,
            &dates,
            stochastic::stochastic_k(&highs, &lows, &closes, p.stochastic_window),
        );

        let line = macd::macd_line(&closes, p.macd_fast, p.macd_slow);
        let signal = line
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|line| macd::signal_line(line, p.macd_signal));
        let macd = self.finish(IndicatorKind::Macd, &dates, line);
        let macd_signal = self.finish(IndicatorKind::MacdSignal, &dates, signal);

        let vwap = if series.has_volume() {
            let volumes = series.volumes();
            self.finish(
                IndicatorKind::Vwap,
                &dates,
                vwap::vwap(&highs, &lows, &closes, &volumes, p.vwap_window),
            )
        } else {
            debug!(ticker = series.ticker(), "no volume in series, skipping VWAP");
            Err(IndicatorError::VolumeUnavailable)
        };

        IndicatorResult {
            rsi,
            stochastic_oscillator,
            macd,
            macd_signal,
            vwap,
        }
    }

    fn finish(
        &self,
        kind: IndicatorKind,
        dates: &[NaiveDate],
        values: Result<Vec<Option<f64>>, CalculationError>,
    ) -> IndicatorOutcome {
        values
            .and_then(|values| {
                output::present(dates, &values, self.params.max_points, self.params.decimals)
            })
            .map_err(|cause| {
                warn!(indicator = %kind, %cause, "indicator calculation failed");
                IndicatorError::Calculation { kind, cause }
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::bar::RawBar;

    fn series(n: usize, with_volume: bool) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1;
                RawBar {
                    date: start + Duration::days(i as i64),
                    open: Some(close - 0.5),
                    high: close + 1.5,
                    low: close - 1.5,
                    close,
                    volume: with_volume.then_some(1_000 + (i as u64 % 7) * 100),
                }
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    #[test]
    fn long_series_reports_twelve_points_everywhere() {
        let result = IndicatorEngine::default().compute(&series(60, true));

        for (kind, outcome) in result.iter() {
            let s = outcome.as_ref().unwrap_or_else(|e| panic!("{kind}: {e}"));
            assert_eq!(s.len(), 12, "{kind}");
            assert_eq!(s.last().unwrap().0, "2024-02-29", "{kind}");
        }
    }

    #[test]
    fn missing_volume_only_affects_vwap() {
        let result = IndicatorEngine::default().compute(&series(60, false));

        assert_eq!(result.vwap, Err(IndicatorError::VolumeUnavailable));
        assert_eq!(
            result.vwap.as_ref().unwrap_err().to_string(),
            "Volume data not available"
        );
        assert!(result.rsi.is_ok());
        assert!(result.stochastic_oscillator.is_ok());
        assert!(result.macd.is_ok());
        assert!(result.macd_signal.is_ok());
    }

    #[test]
    fn short_series_isolates_failures() {
        let result = IndicatorEngine::default().compute(&series(10, true));

        assert_eq!(
            result.rsi.as_ref().unwrap_err().to_string(),
            "Error calculating RSI: need at least 15 data points, got 10"
        );
        assert_eq!(
            result.stochastic_oscillator.as_ref().unwrap_err().to_string(),
            "Error calculating Stochastic Oscillator: need at least 14 data points, got 10"
        );
        assert_eq!(
            result.macd_signal.as_ref().unwrap_err().to_string(),
            "Error calculating MACD Signal: need at least 26 data points, got 10"
        );
        assert_eq!(result.vwap.as_ref().unwrap().len(), 10);
    }

    #[test]
    fn empty_series_reports_every_key_as_failure() {
        let result = IndicatorEngine::default().compute(&series(0, true));

        assert_eq!(
            result.rsi.as_ref().unwrap_err().to_string(),
            "Error calculating RSI: need at least 15 data points, got 0"
        );
        assert!(result.stochastic_oscillator.is_err());
        assert!(result.macd.is_err());
        assert!(result.macd_signal.is_err());
        // no bar carries volume
        assert_eq!(result.vwap, Err(IndicatorError::VolumeUnavailable));
    }

    #[test]
    fn signal_failure_keeps_macd_line() {
        let result = IndicatorEngine::default().compute(&series(30, true));

        assert_eq!(result.macd.as_ref().unwrap().len(), 5);
        assert_eq!(
            result.macd_signal.as_ref().unwrap_err().to_string(),
            "Error calculating MACD Signal: need at least 34 data points, got 30"
        );
    }

    #[test]
    fn invalid_params_fail_per_indicator() {
        let engine = IndicatorEngine::new(IndicatorParams {
            rsi_window: 0,
            ..IndicatorParams::default()
        });
        let result = engine.compute(&series(60, true));

        assert!(matches!(
            result.rsi,
            Err(IndicatorError::Calculation {
                kind: IndicatorKind::Rsi,
                cause: CalculationError::InvalidParameter(_)
            })
        ));
        assert!(result.stochastic_oscillator.is_ok());
    }

    #[test]
    fn rolling_vwap_window_is_honoured() {
        let engine = IndicatorEngine::new(IndicatorParams {
            vwap_window: Some(14),
            ..IndicatorParams::default()
        });
        let short = engine.compute(&series(10, true));
        assert!(short.vwap.is_err());

        let long = engine.compute(&series(30, true));
        assert_eq!(long.vwap.as_ref().unwrap().len(), 12);
    }

    #[test]
    fn compute_is_deterministic() {
        let engine = IndicatorEngine::default();
        let s = series(80, true);
        let first = serde_json::to_string(&engine.compute(&s)).unwrap();
        let second = serde_json::to_string(&engine.compute(&s)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_fixed_keys() {
        let result = IndicatorEngine::default().compute(&series(10, false));
        let value = serde_json::to_value(&result).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(keys.len(), 5);
        for kind in IndicatorKind::ALL {
            assert!(keys.contains(&kind.key()), "{}", kind.key());
        }
        assert_eq!(value["vwap"], "Volume data not available");
        assert!(value["RSI"].as_str().unwrap().starts_with("Error calculating RSI:"));
    }

    #[test]
    fn params_validation() {
        assert!(IndicatorParams::default().validate().is_ok());
        assert!(
            IndicatorParams {
                max_points: 0,
                ..IndicatorParams::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            IndicatorParams {
                decimals: 11,
                ..IndicatorParams::default()
            }
            .validate()
            .is_err()
        );
    }
}
