// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
//   OBV_t = OBV_{t-1} + sign(close_t - close_{t-1}) * volume_t,   OBV_0 = 0
//
// An unchanged close contributes nothing.  A bar with a missing close or
// volume is undefined and contributes nothing to later values; a missing
// previous close makes the direction zero.
// =============================================================================

use crate::types::Series;

pub fn calculate_obv(closes: &[Option<f64>], volumes: &[Option<f64>]) -> Series {
    let mut running = 0.0;

    (0..closes.len())
        .map(|i| {
            let (close, volume) = (closes[i]?, volumes[i]?);
            let prev = i.checked_sub(1).and_then(|p| closes[p]);
            let direction = match prev {
                Some(p) if close > p => 1.0,
                Some(p) if close < p => -1.0,
                _ => 0.0,
            };
            running += direction * volume;
            Some(running)
        })
        .collect()
}
