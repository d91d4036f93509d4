//! Exponential moving average seeded with a simple mean.

/// EMA of `values` over `period`.
///
/// The first defined value sits at index `period - 1` and equals the simple
/// mean of the first `period` inputs; after that
/// `ema[i] = alpha * values[i] + (1 - alpha) * ema[i - 1]` with
/// `alpha = 2 / (period + 1)`. Output is aligned with the input.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(prev);

    for (i, &value) in values.iter().enumerate().skip(period) {
        prev = alpha * value + (1.0 - alpha) * prev;
        out[i] = Some(prev);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_with_simple_mean() {
        let out = ema(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        // alpha = 0.5
        assert_eq!(out[3], Some(3.0));
    }

    #[test]
    fn too_short_input_is_all_undefined() {
        assert!(ema(&[1.0, 2.0], 3).iter().all(Option::is_none));
        assert!(ema(&[1.0, 2.0], 0).iter().all(Option::is_none));
    }
}
