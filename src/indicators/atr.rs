// =============================================================================
// Average True Range (ATR) — Wilder's Smoothing Method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
// The first bar (or a bar whose previous close is missing) has TR = H - L.
//
// ATR is the Wilder average of TR, i.e. the ADX running sum divided by the
// period, so ATR and ADX share one TR smoothing convention:
//   ATR_{period-1} = SMA of the first `period` TR values
//   ATR_t          = ATR_{t-1} - ATR_{t-1} / period + TR_t / period
//
// Default period: 14
// =============================================================================

use super::wilder::WilderSmoother;
use crate::types::Series;

/// Per-bar True Range.
pub fn true_range(highs: &[Option<f64>], lows: &[Option<f64>], closes: &[Option<f64>]) -> Series {
    (0..highs.len())
        .map(|i| {
            let (high, low) = (highs[i]?, lows[i]?);
            let prev_close = i.checked_sub(1).and_then(|p| closes[p]);
            Some(match prev_close {
                Some(pc) => (high - low).max((high - pc).abs()).max((low - pc).abs()),
                None => high - low,
            })
        })
        .collect()
}

/// Compute the ATR series using Wilder's smoothing.
///
/// Undefined for the first `period - 1` bars, for `period == 0`, and for the
/// `period - 1` bars following any bar with a missing high or low.
pub fn calculate_atr(
    highs: &[Option<f64>],
    lows: &[Option<f64>],
    closes: &[Option<f64>],
    period: usize,
) -> Series {
    let mut smoother = WilderSmoother::new(period);
    true_range(highs, lows, closes)
        .into_iter()
        .map(|tr| smoother.update(tr).map(|sum| sum / period as f64))
        .collect()
}

/// ATR as a percentage of the close.
///
/// Useful for comparing volatility across assets with different price scales.
pub fn calculate_atr_pct(atr: &[Option<f64>], closes: &[Option<f64>]) -> Series {
    super::rolling::combine(atr, closes, |a, c| a / c * 100.0)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn defined(values: &[f64]) -> Series {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn first_bar_true_range_is_high_minus_low() {
        let tr = true_range(&defined(&[10.0, 12.0]), &defined(&[8.0, 11.0]), &defined(&[9.0, 11.5]));
        assert_eq!(tr[0], Some(2.0));
        // max(1, |12 - 9|, |11 - 9|) = 3
        assert_eq!(tr[1], Some(3.0));
    }

    #[test]
    fn gap_down_uses_previous_close() {
        let tr = true_range(&defined(&[110.0, 95.0]), &defined(&[100.0, 90.0]), &defined(&[105.0, 92.0]));
        // max(5, |95 - 105|, |90 - 105|) = 15
        assert_eq!(tr[1], Some(15.0));
    }

    #[test]
    fn atr_constant_range() {
        // Every bar has a range of 20 and closes mid-range.
        let n = 30;
        let highs = defined(&vec![110.0; n]);
        let lows = defined(&vec![90.0; n]);
        let closes = defined(&vec![100.0; n]);
        let atr = calculate_atr(&highs, &lows, &closes, 14);
        assert!(atr[12].is_none());
        for v in atr[13..].iter() {
            assert!((v.unwrap() - 20.0).abs() < 1e-10);
        }
    }

    #[test]
    fn atr_seed_is_average() {
        let highs = defined(&[110.0, 115.0, 120.0, 125.0]);
        let lows = defined(&[100.0, 105.0, 110.0, 115.0]);
        let closes = defined(&[105.0, 110.0, 115.0, 120.0]);
        let atr = calculate_atr(&highs, &lows, &closes, 3);
        // TR = 10, 10, 10, 10
        assert!((atr[2].unwrap() - 10.0).abs() < 1e-10);
        assert!((atr[3].unwrap() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn atr_wilder_recursion() {
        let highs = defined(&[10.0, 10.0, 10.0, 16.0]);
        let lows = defined(&[8.0, 8.0, 8.0, 10.0]);
        let closes = defined(&[9.0, 9.0, 9.0, 15.0]);
        let atr = calculate_atr(&highs, &lows, &closes, 3);
        // TR = 2, 2, 2, max(6, 7, 1) = 7 -> (2 * 2 + 7) / 3
        assert!((atr[3].unwrap() - 11.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn atr_zero_period() {
        let v = defined(&[1.0, 2.0]);
        assert_eq!(calculate_atr(&v, &v, &v, 0), vec![None, None]);
    }

    #[test]
    fn atr_pct() {
        let pct = calculate_atr_pct(&[Some(2.0), None], &[Some(100.0), Some(50.0)]);
        assert_eq!(pct, vec![Some(2.0), None]);
    }
}
