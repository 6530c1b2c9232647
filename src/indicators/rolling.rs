// =============================================================================
// Rolling Statistics Primitives
// =============================================================================
//
// Trailing-window statistics over `Option<f64>` series.  A window produces a
// value only when it is full and every element in it is defined, so the first
// `length - 1` positions (and any window touching a gap) are `None`.
//
// Also hosts the element-wise combinator and the index shift used by Ichimoku.
// =============================================================================

use crate::types::Series;

/// Apply `stat` to every full, gap-free trailing window of `length` values.
///
/// Non-finite statistics are reported as `None`.
pub fn rolling_window<F>(series: &[Option<f64>], length: usize, stat: F) -> Series
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; series.len()];
    if length == 0 {
        return out;
    }

    let mut window: Vec<f64> = Vec::with_capacity(length);
    for i in (length - 1)..series.len() {
        window.clear();
        window.extend(series[i + 1 - length..=i].iter().map_while(|v| *v));
        if window.len() == length {
            out[i] = Some(stat(&window)).filter(|v| v.is_finite());
        }
    }
    out
}

/// Simple moving average.
pub fn sma(series: &[Option<f64>], length: usize) -> Series {
    rolling_window(series, length, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), undefined for `length < 2`.
pub fn rolling_std(series: &[Option<f64>], length: usize) -> Series {
    rolling_window(series, length, |w| {
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    })
}

pub fn rolling_min(series: &[Option<f64>], length: usize) -> Series {
    rolling_window(series, length, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn rolling_max(series: &[Option<f64>], length: usize) -> Series {
    rolling_window(series, length, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Element-wise combination of two aligned series; `None` if either side is.
pub fn combine<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> Series
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)).filter(|v| v.is_finite()),
            _ => None,
        })
        .collect()
}

/// Shift a series by `periods` positions, keeping its length.
///
/// A positive shift moves value `i` to position `i + periods` (into the
/// future); a negative shift moves it to `i - |periods|` (into the past).
/// Vacated positions are `None`.
pub fn shift(series: &[Option<f64>], periods: isize) -> Series {
    let n = series.len();
    let mut out = vec![None; n];
    let offset = periods.unsigned_abs();
    if offset >= n {
        return out;
    }
    if periods >= 0 {
        out[offset..].copy_from_slice(&series[..n - offset]);
    } else {
        out[..n - offset].copy_from_slice(&series[offset..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(values: &[f64]) -> Series {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn sma_matches_window_mean() {
        let xs: Vec<f64> = (1..=10).map(|x| x as f64 * 1.5).collect();
        let out = sma(&defined(&xs), 4);
        assert_eq!(out.len(), xs.len());
        for t in 0..xs.len() {
            if t < 3 {
                assert!(out[t].is_none());
            } else {
                let mean = xs[t - 3..=t].iter().sum::<f64>() / 4.0;
                assert!((out[t].unwrap() - mean).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn sma_longer_than_series_is_all_undefined() {
        let out = sma(&defined(&[1.0, 2.0, 3.0]), 5);
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn zero_length_is_all_undefined() {
        assert_eq!(sma(&defined(&[1.0, 2.0]), 0), vec![None, None]);
    }

    #[test]
    fn gap_invalidates_every_window_touching_it() {
        let xs = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)];
        let out = sma(&xs, 2);
        assert_eq!(out, vec![None, Some(1.5), None, None, Some(4.5), Some(5.5)]);
    }

    #[test]
    fn rolling_std_uses_sample_variance() {
        let out = rolling_std(&defined(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 8);
        // Sample std of the classic example: sqrt(32 / 7).
        assert!((out[7].unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(out[6].is_none());
    }

    #[test]
    fn rolling_std_single_element_window_is_undefined() {
        assert_eq!(rolling_std(&defined(&[1.0, 2.0]), 1), vec![None, None]);
    }

    #[test]
    fn rolling_extrema() {
        let xs = defined(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0]);
        assert_eq!(
            rolling_max(&xs, 3),
            vec![None, None, Some(4.0), Some(4.0), Some(5.0), Some(9.0), Some(9.0)]
        );
        assert_eq!(
            rolling_min(&xs, 3),
            vec![None, None, Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(2.0)]
        );
    }

    #[test]
    fn shift_forward_and_backward() {
        let xs = defined(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(shift(&xs, 2), vec![None, None, Some(1.0), Some(2.0)]);
        assert_eq!(shift(&xs, -1), vec![Some(2.0), Some(3.0), Some(4.0), None]);
        assert_eq!(shift(&xs, 0), xs);
        assert_eq!(shift(&xs, 10), vec![None; 4]);
    }

    #[test]
    fn combine_propagates_undefined() {
        let a = vec![Some(1.0), None, Some(3.0)];
        let b = vec![Some(1.0), Some(2.0), None];
        assert_eq!(combine(&a, &b, |x, y| x + y), vec![Some(2.0), None, None]);
    }
}
