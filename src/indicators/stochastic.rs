// =============================================================================
// Stochastic Oscillator (%K / %D)
// =============================================================================
//
//   %K_raw = 100 * (close - lowest_low_k) / (highest_high_k - lowest_low_k)
//   %K     = SMA(%K_raw, smooth_k)      (only when smooth_k > 1)
//   %D     = SMA(%K, d)
//
// A zero high/low range is replaced by DIVISION_EPSILON.
// =============================================================================

use super::guard_denominator;
use super::rolling::{rolling_max, rolling_min, sma};
use crate::types::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticOutput {
    pub k: Series,
    pub d: Series,
}

pub fn calculate_stochastic(
    highs: &[Option<f64>],
    lows: &[Option<f64>],
    closes: &[Option<f64>],
    k: usize,
    d: usize,
    smooth_k: usize,
) -> StochasticOutput {
    let lowest = rolling_min(lows, k);
    let highest = rolling_max(highs, k);

    let raw_k: Series = closes
        .iter()
        .zip(lowest.iter().zip(&highest))
        .map(|(close, (low, high))| match (close, low, high) {
            (Some(c), Some(l), Some(h)) => Some(100.0 * (c - l) / guard_denominator(h - l)),
            _ => None,
        })
        .collect();

    let k_line = if smooth_k > 1 { sma(&raw_k, smooth_k) } else { raw_k };
    let d_line = sma(&k_line, d);

    StochasticOutput {
        k: k_line,
        d: d_line,
    }
}
