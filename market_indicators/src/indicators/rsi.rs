//! Relative Strength Index with Wilder's smoothing.
//!
//! Average gain and loss are seeded with the simple mean of the first `window`
//! price changes, then smoothed as
//! `avg = (prev_avg * (window - 1) + current) / window`.
//! `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`, and 100 when the average
//! loss is zero.

use crate::indicators::CalculationError;

/// RSI aligned with `closes`; the first `window` entries are undefined.
pub fn rsi(closes: &[f64], window: usize) -> Result<Vec<Option<f64>>, CalculationError> {
    if window == 0 {
        return Err(CalculationError::InvalidParameter(
            "RSI window must be at least 1".into(),
        ));
    }
    let required = window + 1;
    if closes.len() < required {
        return Err(CalculationError::InsufficientData {
            required,
            available: closes.len(),
        });
    }

    let mut out = vec![None; closes.len()];
    let w = window as f64;

    let (gain_sum, loss_sum) = closes[..required]
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(g, l), d| {
            if d > 0.0 { (g + d, l) } else { (g, l - d) }
        });
    let mut avg_gain = gain_sum / w;
    let mut avg_loss = loss_sum / w;
    out[window] = Some(from_averages(avg_gain, avg_loss));

    for i in required..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let (gain, loss) = if delta > 0.0 { (delta, 0.0) } else { (0.0, -delta) };
        avg_gain = (avg_gain * (w - 1.0) + gain) / w;
        avg_loss = (avg_loss * (w - 1.0) + loss) / w;
        out[i] = Some(from_averages(avg_gain, avg_loss));
    }

    Ok(out)
}

fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_closes_saturate_at_100() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        let out = rsi(&closes, 14).unwrap();

        assert!(out[..14].iter().all(Option::is_none));
        assert!(out[14..].iter().all(|v| *v == Some(100.0)));
    }

    #[test]
    fn falling_closes_go_to_zero() {
        let closes: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        let out = rsi(&closes, 14).unwrap();
        assert_eq!(out[19], Some(0.0));
    }

    #[test]
    fn balanced_moves_sit_at_50() {
        // +1, -1, +1, -1 ... with an even window: equal average gain and loss.
        let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 10.0 } else { 11.0 }).collect();
        let out = rsi(&closes, 14).unwrap();
        assert!((out[14].unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn wilder_smoothing_after_seed() {
        // window 2: deltas +2, -1 seed gain 1.0 / loss 0.5; then +1.
        let out = rsi(&[10.0, 12.0, 11.0, 12.0], 2).unwrap();
        let seed = 100.0 - 100.0 / (1.0 + 1.0 / 0.5);
        assert!((out[2].unwrap() - seed).abs() < 1e-9);

        let (g, l) = ((1.0 + 1.0) / 2.0, (0.5 + 0.0) / 2.0);
        let next = 100.0 - 100.0 / (1.0 + g / l);
        assert!((out[3].unwrap() - next).abs() < 1e-9);
    }

    #[test]
    fn needs_window_plus_one_closes() {
        let err = rsi(&[1.0; 14], 14).unwrap_err();
        assert_eq!(
            err,
            CalculationError::InsufficientData {
                required: 15,
                available: 14
            }
        );
    }

    #[test]
    fn zero_window_is_invalid() {
        assert!(matches!(
            rsi(&[1.0, 2.0], 0),
            Err(CalculationError::InvalidParameter(_))
        ));
    }
}
