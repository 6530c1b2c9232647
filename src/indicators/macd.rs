// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd_line   = EMA(close, fast) - EMA(close, slow)
//   signal_line = EMA(macd_line, signal)
//   histogram   = macd_line - signal_line
//
// All three EMAs use the same first-value seeding as `calculate_ema`.
// =============================================================================

use super::ema::calculate_ema;
use super::rolling::combine;
use crate::types::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

pub fn calculate_macd(closes: &[Option<f64>], fast: usize, slow: usize, signal: usize) -> MacdOutput {
    let fast_ema = calculate_ema(closes, fast);
    let slow_ema = calculate_ema(closes, slow);
    let macd = combine(&fast_ema, &slow_ema, |f, s| f - s);
    let signal_line = calculate_ema(&macd, signal);
    let histogram = combine(&macd, &signal_line, |m, s| m - s);

    MacdOutput {
        macd,
        signal: signal_line,
        histogram,
    }
}
