//! Moving Average Convergence Divergence.
//!
//! ```text
//! MACD line   = EMA(close, fast) - EMA(close, slow)
//! signal line = EMA(MACD line, signal)
//! ```
//!
//! The line and the signal are computed by separate functions so one can fail
//! while the other still reports.

use crate::indicators::{CalculationError, ema::ema};

/// MACD line aligned with `closes`; the first `slow - 1` entries are undefined.
pub fn macd_line(
    closes: &[f64],
    fast: usize,
    slow: usize,
) -> Result<Vec<Option<f64>>, CalculationError> {
    if fast == 0 || slow == 0 {
        return Err(CalculationError::InvalidParameter(
            "MACD periods must be at least 1".into(),
        ));
    }
    if fast >= slow {
        return Err(CalculationError::InvalidParameter(format!(
            "MACD fast period {fast} must be shorter than slow period {slow}"
        )));
    }
    if closes.len() < slow {
        return Err(CalculationError::InsufficientData {
            required: slow,
            available: closes.len(),
        });
    }

    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    Ok(fast_ema
        .into_iter()
        .zip(slow_ema)
        .map(|(f, s)| Some(f? - s?))
        .collect())
}

/// Signal line over an aligned MACD line.
///
/// The EMA starts at the first defined MACD value, so the signal needs
/// `period` defined MACD values on top of the line's own warm-up.
pub fn signal_line(
    line: &[Option<f64>],
    period: usize,
) -> Result<Vec<Option<f64>>, CalculationError> {
    if period == 0 {
        return Err(CalculationError::InvalidParameter(
            "MACD signal period must be at least 1".into(),
        ));
    }
    let warmup = line.iter().position(Option::is_some).unwrap_or(line.len());
    let defined: Vec<f64> = line[warmup..]
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    if defined.len() < period {
        return Err(CalculationError::InsufficientData {
            required: warmup + period,
            available: line.len(),
        });
    }

    let mut out = vec![None; warmup];
    out.extend(ema(&defined, period));
    Ok(out)
}
