// =============================================================================
// Keltner Channels
// =============================================================================
//
//   middle = EMA(close, ema_period)
//   upper  = middle + multiplier * ATR
//   lower  = middle - multiplier * ATR
//
// The ATR series is passed in so the channel shares the engine's ATR column.

use super::ema::calculate_ema;
use super::rolling::combine;
use crate::types::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct KeltnerOutput {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

pub fn calculate_keltner(
    closes: &[Option<f64>],
    atr: &[Option<f64>],
    ema_period: usize,
    multiplier: f64,
) -> KeltnerOutput {
    let middle = calculate_ema(closes, ema_period);
    KeltnerOutput {
        upper: combine(&middle, atr, |m, a| m + multiplier * a),
        lower: combine(&middle, atr, |m, a| m - multiplier * a),
        middle,
    }
}
