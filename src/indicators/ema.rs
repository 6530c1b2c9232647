// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha  = 2 / (period + 1)
//   EMA_0  = x_0
//   EMA_t  = alpha * x_t + (1 - alpha) * EMA_{t-1}
//
// The recursion is seeded with the first observation itself (no SMA warm-up),
// so the output is defined from the first defined input onwards.  The same
// seeding applies when EMA runs over a derived series such as the MACD line.
// =============================================================================

use crate::types::Series;

/// Compute the EMA series for `values` with look-back `period`.
///
/// # Edge cases
/// - `period == 0` => every value undefined.
/// - Leading `None` values stay `None`; the recursion seeds on the first
///   defined value.
/// - A `None` inside the series yields `None` at that position and restarts
///   the recursion at the next defined value.
pub fn calculate_ema(values: &[Option<f64>], period: usize) -> Series {
    if period == 0 {
        return vec![None; values.len()];
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev: Option<f64> = None;

    values
        .iter()
        .map(|value| {
            let next = match (*value, prev) {
                (Some(x), Some(p)) => Some(alpha * x + (1.0 - alpha) * p),
                (Some(x), None) => Some(x),
                (None, _) => None,
            };
            prev = next;
            next
        })
        .collect()
}
