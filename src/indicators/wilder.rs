// =============================================================================
// Wilder's Smoothing
// =============================================================================
//
//   S_seed = raw_0 + raw_1 + ... + raw_{period-1}      (sum of first window)
//   S_t    = S_{t-1} - S_{t-1} / period + raw_t
//
// This is the running-sum form used for TR, +DM and -DM in ADX; dividing by
// `period` gives the Wilder average used for ATR.  The smoother is a small
// state machine fed one value at a time, so callers drive it from an explicit
// left-to-right scan.  A missing input resets it: the next `period` defined
// values re-seed the sum.
// =============================================================================

#[derive(Debug, Clone)]
pub struct WilderSmoother {
    period: usize,
    warmup_sum: f64,
    warmup_count: usize,
    value: Option<f64>,
}

impl WilderSmoother {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            warmup_sum: 0.0,
            warmup_count: 0,
            value: None,
        }
    }

    /// Feed the next raw value; returns the smoothed sum once seeded.
    pub fn update(&mut self, raw: Option<f64>) -> Option<f64> {
        if self.period == 0 {
            return None;
        }
        let Some(x) = raw else {
            self.reset();
            return None;
        };

        self.value = match self.value {
            Some(prev) => Some(prev - prev / self.period as f64 + x),
            None => {
                self.warmup_sum += x;
                self.warmup_count += 1;
                (self.warmup_count == self.period).then_some(self.warmup_sum)
            }
        };
        self.value
    }

    fn reset(&mut self) {
        self.warmup_sum = 0.0;
        self.warmup_count = 0;
        self.value = None;
    }
}
