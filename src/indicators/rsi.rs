// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.  The first
//          bar has no delta.
// Step 2 — Split deltas into gains (positive part) and losses (negative part,
//          as a positive number).
// Step 3 — avg_gain / avg_loss = `period`-bar simple rolling mean.
// Step 4 — RS  = avg_gain / avg_loss   (avg_loss == 0 => DIVISION_EPSILON)
//          RSI = 100 - 100 / (1 + RS)
//
// The first defined value is at index `period` (needs `period` deltas).  With
// no losses RSI saturates towards 100; a perfectly flat window reads 0 because
// both averages are zero and the epsilon guard makes RS zero.
// =============================================================================

use super::guard_denominator;
use super::rolling::{combine, sma};
use crate::types::Series;

pub fn calculate_rsi(closes: &[Option<f64>], period: usize) -> Series {
    let mut gains: Series = vec![None; closes.len()];
    let mut losses: Series = vec![None; closes.len()];

    for i in 1..closes.len() {
        if let (Some(prev), Some(curr)) = (closes[i - 1], closes[i]) {
            let delta = curr - prev;
            gains[i] = Some(delta.max(0.0));
            losses[i] = Some((-delta).max(0.0));
        }
    }

    let avg_gain = sma(&gains, period);
    let avg_loss = sma(&losses, period);

    combine(&avg_gain, &avg_loss, |gain, loss| {
        let rs = gain / guard_denominator(loss);
        100.0 - 100.0 / (1.0 + rs)
    })
}
