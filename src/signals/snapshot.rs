// =============================================================================
// Signal Snapshot — typed classifications for one row of a frame
// =============================================================================
//
// Report collaborators read the latest row; the snapshot works for any row.
// Which groups are populated follows the frame's parameter set, not the
// presence of columns.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::composite::{Bias, ScoreClass, TrendSignal, TrendStrength, VolatilityStatus};
use crate::engine::columns;
use crate::frame::IndicatorFrame;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSnapshot {
    pub sma_cross: Option<i8>,
    pub ema_cross: Option<i8>,
    pub adx: Option<f64>,
    pub strength: Option<TrendStrength>,
    pub overall: Option<TrendSignal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumSnapshot {
    pub rsi: Option<i8>,
    pub macd_cross: Option<i8>,
    pub stochastic: Option<i8>,
    pub score: Option<i8>,
    pub class: Option<ScoreClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilitySnapshot {
    pub squeeze: Option<bool>,
    pub bb_width: Option<f64>,
    pub atr_percent: Option<f64>,
    pub status: Option<VolatilityStatus>,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudSnapshot {
    pub cloud_direction: Option<i8>,
    pub sar: Option<i8>,
    pub obv: Option<i8>,
    pub score: Option<i8>,
    pub class: Option<ScoreClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSnapshot {
    pub row: usize,
    pub timestamp: DateTime<Utc>,
    pub close: Option<f64>,
    /// Close vs SMA20 vs SMA50.
    pub short_term_bias: Option<Bias>,
    /// SMA50 vs SMA150.
    pub long_term_bias: Option<Bias>,
    pub trend: Option<TrendSnapshot>,
    pub momentum: Option<MomentumSnapshot>,
    pub volatility: Option<VolatilitySnapshot>,
    pub cloud: Option<CloudSnapshot>,
}

impl SignalSnapshot {
    pub fn latest(frame: &IndicatorFrame) -> Option<Self> {
        Self::at(frame, frame.latest_row()?)
    }

    /// Snapshot of `row`; `None` when the row is out of range.
    pub fn at(frame: &IndicatorFrame, row: usize) -> Option<Self> {
        let timestamp = *frame.index().get(row)?;
        let float = |name: &str| frame.float(name).and_then(|v| v[row]);
        let signal = |name: &str| frame.signal(name).and_then(|v| v[row]);
        let families = frame.parameters().signals;

        let close = float(columns::CLOSE);
        let sma20 = float("SMA20");
        let sma50 = float("SMA50");
        let sma150 = float("SMA150");

        let short_term_bias = match (close, sma20, sma50) {
            (Some(c), Some(s20), Some(s50)) => Some(Bias::from_ladder(&[c, s20, s50])),
            _ => None,
        };
        let long_term_bias = match (sma50, sma150) {
            (Some(s50), Some(s150)) => Some(Bias::from_ladder(&[s50, s150])),
            _ => None,
        };

        let trend = families.trend.map(|_| {
            let sma_cross = signal(columns::SMA_CROSS);
            let ema_cross = signal(columns::EMA_CROSS);
            let adx = float(columns::ADX);
            let overall = match (sma_cross, ema_cross, adx) {
                (Some(s), Some(e), Some(a)) => Some(TrendSignal::classify(s, e, a)),
                _ => None,
            };
            TrendSnapshot {
                sma_cross,
                ema_cross,
                adx,
                strength: adx.map(TrendStrength::from_adx),
                overall,
            }
        });

        let momentum = families.momentum.then(|| {
            let score = signal(columns::MOMENTUM_SCORE);
            MomentumSnapshot {
                rsi: signal(columns::RSI_SIGNAL),
                macd_cross: signal(columns::MACD_CROSS),
                stochastic: signal(columns::STOCH_SIGNAL),
                score,
                class: score.map(ScoreClass::from_score),
            }
        });

        let volatility = families.volatility.then(|| {
            let squeeze = signal(columns::BB_SQUEEZE).map(|s| s == 1);
            let atr_percent = float(columns::ATR_PERCENT);
            let status = squeeze.and_then(|s| VolatilityStatus::classify(s, atr_percent));
            VolatilitySnapshot {
                squeeze,
                bb_width: float(columns::BB_WIDTH),
                atr_percent,
                status,
                description: status.map(VolatilityStatus::description),
            }
        });

        let cloud = families.multi_timeframe.then(|| {
            let score = signal(columns::ICHIMOKU_SCORE);
            CloudSnapshot {
                cloud_direction: signal(columns::CLOUD_DIRECTION),
                sar: signal(columns::SAR_SIGNAL),
                obv: signal(columns::OBV_SIGNAL),
                score,
                class: score.map(ScoreClass::from_score),
            }
        });

        Some(Self {
            row,
            timestamp,
            close,
            short_term_bias,
            long_term_bias,
            trend,
            momentum,
            volatility,
            cloud,
        })
    }
}
