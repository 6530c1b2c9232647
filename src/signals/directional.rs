// =============================================================================
// Directional Signals — per-bar categorical reads of indicator values
// =============================================================================
//
// Each function maps the indicator values of one bar to a value in a small
// fixed domain.  Any undefined input makes the signal undefined.  The
// `*_series` helpers apply the same mapping row by row.

use crate::types::SignalSeries;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const STOCH_UPPER: f64 = 80.0;
pub const STOCH_LOWER: f64 = 20.0;

/// +1 when `fast > slow`, otherwise -1.  No neutral zone.
pub fn cross(fast: Option<f64>, slow: Option<f64>) -> Option<i8> {
    Some(if fast? > slow? { 1 } else { -1 })
}

/// -1 overbought (> 70), +1 oversold (< 30), else 0.
pub fn rsi(rsi: Option<f64>) -> Option<i8> {
    let rsi = rsi?;
    Some(if rsi > RSI_OVERBOUGHT {
        -1
    } else if rsi < RSI_OVERSOLD {
        1
    } else {
        0
    })
}

/// +1 when %K > %D below 80; -1 when %K < %D with %D above 20; else 0.
pub fn stochastic(k: Option<f64>, d: Option<f64>) -> Option<i8> {
    let (k, d) = (k?, d?);
    Some(if k > d && k < STOCH_UPPER {
        1
    } else if k < d && d > STOCH_LOWER {
        -1
    } else {
        0
    })
}

/// 1 when the Bollinger band sits strictly inside the Keltner channel, else 0.
pub fn squeeze(
    bb_upper: Option<f64>,
    bb_lower: Option<f64>,
    kc_upper: Option<f64>,
    kc_lower: Option<f64>,
) -> Option<i8> {
    Some(i8::from(bb_upper? < kc_upper? && bb_lower? > kc_lower?))
}

/// +1 above span A, -1 below span B, else 0.  Undefined unless both spans are.
pub fn cloud_direction(close: Option<f64>, span_a: Option<f64>, span_b: Option<f64>) -> Option<i8> {
    let (close, span_a, span_b) = (close?, span_a?, span_b?);
    Some(if close > span_a {
        1
    } else if close < span_b {
        -1
    } else {
        0
    })
}

pub fn cross_series(fast: &[Option<f64>], slow: &[Option<f64>]) -> SignalSeries {
    fast.iter().zip(slow).map(|(f, s)| cross(*f, *s)).collect()
}

pub fn rsi_series(values: &[Option<f64>]) -> SignalSeries {
    values.iter().map(|v| rsi(*v)).collect()
}

pub fn stochastic_series(k: &[Option<f64>], d: &[Option<f64>]) -> SignalSeries {
    k.iter().zip(d).map(|(k, d)| stochastic(*k, *d)).collect()
}

/// Row-wise sum of several signal series; undefined where any input is.
pub fn sum_series(parts: &[&SignalSeries]) -> SignalSeries {
    let len = parts.first().map_or(0, |p| p.len());
    (0..len)
        .map(|i| parts.iter().map(|p| p[i]).sum::<Option<i8>>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_has_no_neutral_zone() {
        assert_eq!(cross(Some(2.0), Some(1.0)), Some(1));
        assert_eq!(cross(Some(1.0), Some(1.0)), Some(-1));
        assert_eq!(cross(None, Some(1.0)), None);
    }

    #[test]
    fn rsi_thresholds_are_strict() {
        assert_eq!(rsi(Some(70.0)), Some(0));
        assert_eq!(rsi(Some(70.1)), Some(-1));
        assert_eq!(rsi(Some(30.0)), Some(0));
        assert_eq!(rsi(Some(29.9)), Some(1));
        assert_eq!(rsi(None), None);
    }

    #[test]
    fn stochastic_cases() {
        assert_eq!(stochastic(Some(50.0), Some(40.0)), Some(1));
        assert_eq!(stochastic(Some(85.0), Some(80.0)), Some(0));
        assert_eq!(stochastic(Some(40.0), Some(50.0)), Some(-1));
        assert_eq!(stochastic(Some(10.0), Some(15.0)), Some(0));
        assert_eq!(stochastic(Some(50.0), Some(50.0)), Some(0));
    }

    #[test]
    fn squeeze_requires_full_nesting() {
        assert_eq!(squeeze(Some(105.0), Some(95.0), Some(106.0), Some(94.0)), Some(1));
        assert_eq!(squeeze(Some(107.0), Some(95.0), Some(106.0), Some(94.0)), Some(0));
        assert_eq!(squeeze(Some(105.0), Some(95.0), None, Some(94.0)), None);
    }

    #[test]
    fn cloud_direction_excludes_undefined_spans() {
        assert_eq!(cloud_direction(Some(10.0), Some(9.0), Some(8.0)), Some(1));
        assert_eq!(cloud_direction(Some(7.0), Some(9.0), Some(8.0)), Some(-1));
        assert_eq!(cloud_direction(Some(8.5), Some(9.0), Some(8.0)), Some(0));
        assert_eq!(cloud_direction(Some(10.0), None, Some(8.0)), None);
        assert_eq!(cloud_direction(Some(10.0), Some(9.0), None), None);
    }

    #[test]
    fn sum_series_propagates_undefined() {
        let a = vec![Some(1), Some(-1), None];
        let b = vec![Some(1), Some(0), Some(1)];
        assert_eq!(sum_series(&[&a, &b]), vec![Some(2), Some(-1), None]);
    }
}
