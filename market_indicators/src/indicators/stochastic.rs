//! Stochastic oscillator %K.

use crate::indicators::CalculationError;

/// `%K = 100 * (close - lowest low) / (highest high - lowest low)` over the
/// trailing `window` bars, aligned with the input.
///
/// The first `window - 1` entries are undefined. A window whose high and low
/// coincide has no defined %K and is left undefined as well.
pub fn stochastic_k(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, CalculationError> {
    if window == 0 {
        return Err(CalculationError::InvalidParameter(
            "stochastic window must be at least 1".into(),
        ));
    }
    let n = closes.len();
    if highs.len() != n || lows.len() != n {
        return Err(CalculationError::InvalidParameter(format!(
            "high/low/close lengths differ: {}/{}/{}",
            highs.len(),
            lows.len(),
            n
        )));
    }
    if n < window {
        return Err(CalculationError::InsufficientData {
            required: window,
            available: n,
        });
    }

    let mut out = vec![None; n];
    for i in (window - 1)..n {
        let span = (i + 1 - window)..=i;
        let highest = highs[span.clone()]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let lowest = lows[span].iter().copied().fold(f64::INFINITY, f64::min);
        let range = highest - lowest;
        if range > 0.0 {
            out[i] = Some(100.0 * (closes[i] - lowest) / range);
        }
    }
    Ok(out)
}
