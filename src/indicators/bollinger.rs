// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), with σ the sample standard deviation over the
// same window.  The Band Width is the normalised distance:
// BBW = (upper - lower) / middle.

use super::rolling::{combine, rolling_std, sma};
use crate::types::Series;

/// Band series aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerOutput {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

impl BollingerOutput {
    /// `(upper - lower) / middle`; undefined when the middle band is zero.
    pub fn width(&self) -> Series {
        let spread = combine(&self.upper, &self.lower, |u, l| u - l);
        combine(&spread, &self.middle, |s, m| s / m)
    }
}

pub fn calculate_bollinger(closes: &[Option<f64>], period: usize, num_std: f64) -> BollingerOutput {
    let middle = sma(closes, period);
    let deviation: Series = rolling_std(closes, period)
        .into_iter()
        .map(|sd| sd.map(|sd| sd * num_std))
        .collect();

    BollingerOutput {
        upper: combine(&middle, &deviation, |m, d| m + d),
        lower: combine(&middle, &deviation, |m, d| m - d),
        middle,
    }
}
