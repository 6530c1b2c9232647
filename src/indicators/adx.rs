// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.
//
// Calculation pipeline:
//   1. Compute +DM (positive directional movement) and -DM per bar.
//   2. Compute True Range (TR) per bar.
//   3. Apply Wilder's smoothing (period) to +DM, -DM, and TR.
//   4. Derive +DI = smoothed(+DM) / smoothed(TR) * 100
//            -DI = smoothed(-DM) / smoothed(TR) * 100
//   5. DX  = |+DI - -DI| / (+DI + -DI) * 100
//   6. ADX = simple rolling mean of DX over `period` bars.
//
// Seeding: bar 0 has TR = H - L and zero directional movement.  Each smoothed
// series is seeded at index `period - 1` with the plain sum of its first
// `period` raw values, then follows S_t = S_{t-1} - S_{t-1}/period + raw_t.
// +DI/-DI/DX are therefore defined from index `period - 1` and ADX from index
// `2 * period - 2`.
//
// Zero TR or zero DI sum is replaced by DIVISION_EPSILON.
//
// Interpretation:
//   ADX > 25  => trending market
//   ADX < 20  => ranging / choppy market
// =============================================================================

use super::atr::true_range;
use super::guard_denominator;
use super::rolling::sma;
use super::wilder::WilderSmoother;
use crate::types::Series;

#[derive(Debug, Clone, PartialEq)]
pub struct AdxOutput {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

/// Compute ADX, +DI and -DI.
pub fn calculate_adx(
    highs: &[Option<f64>],
    lows: &[Option<f64>],
    closes: &[Option<f64>],
    period: usize,
) -> AdxOutput {
    let n = highs.len();
    let tr = true_range(highs, lows, closes);

    // Smoothed (TR, +DM, -DM) carried through an explicit forward scan.
    let mut smooth_tr = WilderSmoother::new(period);
    let mut smooth_plus_dm = WilderSmoother::new(period);
    let mut smooth_minus_dm = WilderSmoother::new(period);

    let mut plus_di: Series = Vec::with_capacity(n);
    let mut minus_di: Series = Vec::with_capacity(n);
    let mut dx: Series = Vec::with_capacity(n);

    for i in 0..n {
        let (pdm, mdm) = directional_movement(highs, lows, i).unzip();

        let smoothed = (
            smooth_tr.update(tr[i]),
            smooth_plus_dm.update(pdm),
            smooth_minus_dm.update(mdm),
        );

        match smoothed {
            (Some(s_tr), Some(s_pdm), Some(s_mdm)) => {
                let (pdi, mdi, dx_value) = compute_dx(s_pdm, s_mdm, s_tr);
                plus_di.push(Some(pdi));
                minus_di.push(Some(mdi));
                dx.push(Some(dx_value));
            }
            _ => {
                plus_di.push(None);
                minus_di.push(None);
                dx.push(None);
            }
        }
    }

    AdxOutput {
        adx: sma(&dx, period),
        plus_di,
        minus_di,
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Raw (+DM, -DM) for bar `i`; zero for the first bar or after a missing bar.
fn directional_movement(highs: &[Option<f64>], lows: &[Option<f64>], i: usize) -> Option<(f64, f64)> {
    let (high, low) = (highs[i]?, lows[i]?);
    let prev = i
        .checked_sub(1)
        .and_then(|p| Some((highs[p]?, lows[p]?)));

    let Some((prev_high, prev_low)) = prev else {
        return Some((0.0, 0.0));
    };

    let up_move = high - prev_high;
    let down_move = prev_low - low;

    let pdm = if up_move > down_move && up_move > 0.0 {
        up_move
    } else {
        0.0
    };
    let mdm = if down_move > up_move && down_move > 0.0 {
        down_move
    } else {
        0.0
    };
    Some((pdm, mdm))
}

/// Compute (+DI, -DI, DX) from smoothed +DM, -DM and TR.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> (f64, f64, f64) {
    let tr = guard_denominator(smooth_tr);
    let plus_di = 100.0 * (smooth_plus_dm / tr);
    let minus_di = 100.0 * (smooth_minus_dm / tr);
    let dx = 100.0 * (plus_di - minus_di).abs() / guard_denominator(plus_di + minus_di);
    (plus_di, minus_di, dx)
}
