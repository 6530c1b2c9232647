// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicator families.  Every
// public function takes slices aligned with the price index and returns
// series of the same length, with `None` wherever a window or recursion has
// not yet accumulated enough history.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod ichimoku;
pub mod keltner;
pub mod macd;
pub mod obv;
pub mod psar;
pub mod rolling;
pub mod rsi;
pub mod stochastic;
pub mod wilder;

/// Substituted for a zero denominator in RSI, Stochastic and ADX/DX.
pub const DIVISION_EPSILON: f64 = 0.00001;

/// Replace an exact zero with [`DIVISION_EPSILON`].
#[inline]
pub(crate) fn guard_denominator(value: f64) -> f64 {
    if value == 0.0 {
        DIVISION_EPSILON
    } else {
        value
    }
}
