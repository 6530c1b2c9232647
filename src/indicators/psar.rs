// =============================================================================
// Parabolic SAR (Stop And Reverse)
// =============================================================================
//
// A trend-flip state machine advanced once per bar, strictly in index order.
// State: (sar, extreme point, acceleration factor, trend).
//
// Bar 0:  trend = up, sar = low_0, ep = high_0, af = af_start.
//
// Uptrend step:
//   sar_t = sar_{t-1} + af_{t-1} * (ep_{t-1} - sar_{t-1})
//   low_t < sar_t  => flip down: sar_t = ep_{t-1}, ep_t = low_t, af_t = af_start
//   otherwise      => stay up; a new high raises ep and steps af (capped).
// Downtrend step mirrors it with highs and lows swapped.
//
// No clamping to prior bars' extremes is applied.  A bar with a missing high
// or low is undefined and restarts the machine from the next defined bar.
// =============================================================================

use crate::types::{Series, SignalSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn as_signal(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsarParams {
    pub af_start: f64,
    pub af_step: f64,
    pub af_max: f64,
}

impl Default for PsarParams {
    fn default() -> Self {
        Self {
            af_start: 0.02,
            af_step: 0.02,
            af_max: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SarState {
    sar: f64,
    extreme: f64,
    af: f64,
    trend: Trend,
}

impl SarState {
    fn seed(high: f64, low: f64, params: &PsarParams) -> Self {
        Self {
            sar: low,
            extreme: high,
            af: params.af_start,
            trend: Trend::Up,
        }
    }

    fn step(self, high: f64, low: f64, params: &PsarParams) -> Self {
        let accelerate = |af: f64| (af + params.af_step).min(params.af_max);

        match self.trend {
            Trend::Up => {
                let sar = self.sar + self.af * (self.extreme - self.sar);
                if low < sar {
                    Self {
                        sar: self.extreme,
                        extreme: low,
                        af: params.af_start,
                        trend: Trend::Down,
                    }
                } else if high > self.extreme {
                    Self {
                        sar,
                        extreme: high,
                        af: accelerate(self.af),
                        trend: Trend::Up,
                    }
                } else {
                    Self { sar, ..self }
                }
            }
            Trend::Down => {
                let sar = self.sar - self.af * (self.sar - self.extreme);
                if high > sar {
                    Self {
                        sar: self.extreme,
                        extreme: high,
                        af: params.af_start,
                        trend: Trend::Up,
                    }
                } else if low < self.extreme {
                    Self {
                        sar,
                        extreme: low,
                        af: accelerate(self.af),
                        trend: Trend::Down,
                    }
                } else {
                    Self { sar, ..self }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PsarOutput {
    pub sar: Series,
    /// +1 in an uptrend, -1 in a downtrend.
    pub trend: SignalSeries,
}

pub fn calculate_psar(highs: &[Option<f64>], lows: &[Option<f64>], params: &PsarParams) -> PsarOutput {
    let n = highs.len();
    let mut sar = Vec::with_capacity(n);
    let mut trend = Vec::with_capacity(n);
    let mut state: Option<SarState> = None;

    for (high, low) in highs.iter().zip(lows) {
        state = match (high, low) {
            (Some(h), Some(l)) => Some(match state {
                Some(prev) => prev.step(*h, *l, params),
                None => SarState::seed(*h, *l, params),
            }),
            _ => None,
        };
        sar.push(state.map(|s| s.sar));
        trend.push(state.map(|s| s.trend.as_signal()));
    }

    PsarOutput { sar, trend }
}
