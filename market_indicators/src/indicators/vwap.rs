//! Volume-weighted average price over the typical price `(high + low + close) / 3`.
//!
//! The default is the cumulative (anchored) form
//! `VWAP[i] = sum(tp * volume)[..=i] / sum(volume)[..=i]`. With a window the
//! sums run over the trailing `window` bars instead.
//!
//! Bars without volume add nothing to either sum. A point whose volume sum is
//! still zero is undefined.

use crate::indicators::CalculationError;

pub fn vwap(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    volumes: &[Option<u64>],
    window: Option<usize>,
) -> Result<Vec<Option<f64>>, CalculationError> {
    let n = closes.len();
    if highs.len() != n || lows.len() != n || volumes.len() != n {
        return Err(CalculationError::InvalidParameter(format!(
            "high/low/close/volume lengths differ: {}/{}/{}/{}",
            highs.len(),
            lows.len(),
            n,
            volumes.len()
        )));
    }
    if window == Some(0) {
        return Err(CalculationError::InvalidParameter(
            "VWAP window must be at least 1".into(),
        ));
    }
    let required = window.unwrap_or(1);
    if n < required {
        return Err(CalculationError::InsufficientData {
            required,
            available: n,
        });
    }

    // prefix sums of price*volume and volume
    let mut pv = Vec::with_capacity(n + 1);
    let mut vol = Vec::with_capacity(n + 1);
    pv.push(0.0);
    vol.push(0.0);
    for i in 0..n {
        let v = volumes[i].unwrap_or(0) as f64;
        let tp = (highs[i] + lows[i] + closes[i]) / 3.0;
        pv.push(pv[i] + tp * v);
        vol.push(vol[i] + v);
    }

    let out = (0..n)
        .map(|i| {
            let from = match window {
                Some(w) if i + 1 < w => return None,
                Some(w) => i + 1 - w,
                None => 0,
            };
            let volume = vol[i + 1] - vol[from];
            (volume > 0.0).then(|| (pv[i + 1] - pv[from]) / volume)
        })
        .collect();
    Ok(out)
}
