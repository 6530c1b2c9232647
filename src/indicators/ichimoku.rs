// =============================================================================
// Ichimoku Cloud
// =============================================================================
//
//   tenkan_sen    = (max(high, tenkan) + min(low, tenkan)) / 2
//   kijun_sen     = (max(high, kijun)  + min(low, kijun))  / 2
//   senkou_span_a = (tenkan_sen + kijun_sen) / 2              shifted +kijun
//   senkou_span_b = (max(high, senkou) + min(low, senkou)) / 2 shifted +kijun
//   chikou_span   = close                                     shifted -kijun
//
// A forward shift assigns the value computed at `i` to position `i + kijun`;
// the backward shift assigns close[i] to position `i - kijun`.  The output
// keeps the input length, so the last `kijun` projected span values are
// dropped and the trailing `kijun` chikou positions are undefined.
// =============================================================================

use super::rolling::{combine, rolling_max, rolling_min, shift};
use crate::types::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct IchimokuOutput {
    pub tenkan: Series,
    pub kijun: Series,
    pub span_a: Series,
    pub span_b: Series,
    pub chikou: Series,
}

fn midpoint(highs: &[Option<f64>], lows: &[Option<f64>], period: usize) -> Series {
    combine(&rolling_max(highs, period), &rolling_min(lows, period), |h, l| (h + l) / 2.0)
}

pub fn calculate_ichimoku(
    highs: &[Option<f64>],
    lows: &[Option<f64>],
    closes: &[Option<f64>],
    tenkan: usize,
    kijun: usize,
    senkou: usize,
) -> IchimokuOutput {
    let tenkan_sen = midpoint(highs, lows, tenkan);
    let kijun_sen = midpoint(highs, lows, kijun);
    let displacement = kijun as isize;

    let span_a = combine(&tenkan_sen, &kijun_sen, |t, k| (t + k) / 2.0);
    let span_b = midpoint(highs, lows, senkou);

    IchimokuOutput {
        span_a: shift(&span_a, displacement),
        span_b: shift(&span_b, displacement),
        chikou: shift(closes, -displacement),
        tenkan: tenkan_sen,
        kijun: kijun_sen,
    }
}
