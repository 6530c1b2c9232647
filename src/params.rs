// =============================================================================
// Parameter Sets — named, immutable indicator configurations
// =============================================================================
//
// Each named set lists the indicator families to compute and their windows
// and multipliers.  Base families (SMA/EMA ladder, RSI, MACD, Bollinger, ATR,
// Parabolic SAR, Stochastic, ADX, OBV) are enabled in every set; optional
// families are `Option` fields, `None` meaning disabled.
//
// Resolving an unknown name yields the `default` set with `fell_back = true`
// so the caller can log or surface the substitution.
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;
pub use crate::indicators::psar::PsarParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSetName {
    Default,
    ShortTerm,
    MediumTerm,
    HighFreq,
    TightChannel,
    WideChannel,
    TrendFollowing,
    Momentum,
    Volatility,
    Ichimoku,
}

impl ParameterSetName {
    pub const ALL: [Self; 10] = [
        Self::Default,
        Self::ShortTerm,
        Self::MediumTerm,
        Self::HighFreq,
        Self::TightChannel,
        Self::WideChannel,
        Self::TrendFollowing,
        Self::Momentum,
        Self::Volatility,
        Self::Ichimoku,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ShortTerm => "short_term",
            Self::MediumTerm => "medium_term",
            Self::HighFreq => "high_freq",
            Self::TightChannel => "tight_channel",
            Self::WideChannel => "wide_channel",
            Self::TrendFollowing => "trend_following",
            Self::Momentum => "momentum",
            Self::Volatility => "volatility",
            Self::Ichimoku => "ichimoku",
        }
    }
}

impl Default for ParameterSetName {
    fn default() -> Self {
        Self::Default
    }
}

impl fmt::Display for ParameterSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterSetName {
    type Err = IndicatorError;

    /// Exact, case-sensitive match on the snake_case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| IndicatorError::UnknownParameterSet(s.to_string()))
    }
}

// =============================================================================
// Family parameters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiParams {
    /// Output column name, e.g. `RSI` or `RSI7`.
    pub column: &'static str,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdParams {
    /// Column prefix: `<prefix>`, `<prefix>_Signal`, `<prefix>_Histogram`.
    pub prefix: &'static str,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerParams {
    /// Column prefix: `<prefix>_High`, `<prefix>_Mid`, `<prefix>_Low`.
    pub prefix: &'static str,
    pub length: usize,
    pub std_mult: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticParams {
    pub k: usize,
    pub d: usize,
    pub smooth_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeltnerParams {
    pub ema_length: usize,
    pub atr_mult: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IchimokuParams {
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou: usize,
}

/// Moving-average windows compared by the trend cross signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSignalParams {
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
}

/// Which categorical signal groups are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalFamilies {
    pub trend: Option<TrendSignalParams>,
    pub momentum: bool,
    pub volatility: bool,
    pub multi_timeframe: bool,
}

// =============================================================================
// ParameterSet
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub name: ParameterSetName,

    pub sma_windows: Vec<usize>,
    pub ema_windows: Vec<usize>,

    pub rsi: RsiParams,
    pub rsi_fast: Option<RsiParams>,

    pub macd: MacdParams,
    pub macd_fast: Option<MacdParams>,

    pub bollinger: BollingerParams,
    pub bollinger_tight: Option<BollingerParams>,
    pub bollinger_wide: Option<BollingerParams>,

    pub atr_length: usize,
    pub psar: PsarParams,
    pub stochastic: StochasticParams,
    pub adx_length: usize,
    pub obv_ma_length: usize,

    pub keltner: Option<KeltnerParams>,
    pub ichimoku: Option<IchimokuParams>,

    pub signals: SignalFamilies,
}

/// Outcome of resolving a user-supplied parameter-set name.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub set: ParameterSet,
    pub requested: String,
    /// `true` when `requested` was not a known name and `default` was used.
    pub fell_back: bool,
}

const BASE_MA_WINDOWS: [usize; 6] = [5, 10, 20, 50, 100, 150];

const SHORT_TERM_SMA: [usize; 2] = [9, 21];
const SHORT_TERM_EMA: [usize; 2] = [12, 26];
const LONG_TERM_WINDOW: usize = 200;

const RSI_FAST: RsiParams = RsiParams {
    column: "RSI7",
    length: 7,
};
const MACD_FAST: MacdParams = MacdParams {
    prefix: "MACD_HF",
    fast: 5,
    slow: 35,
    signal: 5,
};
const BOLLINGER_TIGHT: BollingerParams = BollingerParams {
    prefix: "BB_Tight",
    length: 14,
    std_mult: 1.5,
};
const BOLLINGER_WIDE: BollingerParams = BollingerParams {
    prefix: "BB_Wide",
    length: 30,
    std_mult: 2.5,
};
const KELTNER: KeltnerParams = KeltnerParams {
    ema_length: 20,
    atr_mult: 2.0,
};
const ICHIMOKU: IchimokuParams = IchimokuParams {
    tenkan: 9,
    kijun: 26,
    senkou: 52,
};
const TREND_SIGNALS: TrendSignalParams = TrendSignalParams {
    sma_fast: 50,
    sma_slow: LONG_TERM_WINDOW,
    ema_fast: 12,
    ema_slow: 26,
};

impl ParameterSet {
    /// The families every set computes.
    fn base(name: ParameterSetName) -> Self {
        Self {
            name,
            sma_windows: BASE_MA_WINDOWS.to_vec(),
            ema_windows: BASE_MA_WINDOWS.to_vec(),
            rsi: RsiParams {
                column: "RSI",
                length: 14,
            },
            rsi_fast: None,
            macd: MacdParams {
                prefix: "MACD",
                fast: 12,
                slow: 26,
                signal: 9,
            },
            macd_fast: None,
            bollinger: BollingerParams {
                prefix: "BB",
                length: 20,
                std_mult: 2.0,
            },
            bollinger_tight: None,
            bollinger_wide: None,
            atr_length: 14,
            psar: PsarParams::default(),
            stochastic: StochasticParams {
                k: 14,
                d: 3,
                smooth_k: 3,
            },
            adx_length: 14,
            obv_ma_length: 20,
            keltner: None,
            ichimoku: None,
            signals: SignalFamilies::default(),
        }
    }

    fn with_short_term_averages(mut self) -> Self {
        self.sma_windows.extend(SHORT_TERM_SMA);
        self.ema_windows.extend(SHORT_TERM_EMA);
        self
    }

    fn with_long_term_averages(mut self) -> Self {
        self.sma_windows.push(LONG_TERM_WINDOW);
        self.ema_windows.push(LONG_TERM_WINDOW);
        self
    }

    /// Build the set for a known name.
    pub fn named(name: ParameterSetName) -> Self {
        let base = Self::base(name);
        match name {
            ParameterSetName::Default => Self {
                rsi_fast: Some(RSI_FAST),
                macd_fast: Some(MACD_FAST),
                bollinger_tight: Some(BOLLINGER_TIGHT),
                bollinger_wide: Some(BOLLINGER_WIDE),
                keltner: Some(KELTNER),
                ichimoku: Some(ICHIMOKU),
                signals: SignalFamilies {
                    trend: Some(TREND_SIGNALS),
                    momentum: true,
                    volatility: true,
                    multi_timeframe: true,
                },
                ..base.with_short_term_averages().with_long_term_averages()
            },
            ParameterSetName::ShortTerm => base.with_short_term_averages(),
            ParameterSetName::MediumTerm => base.with_long_term_averages(),
            ParameterSetName::HighFreq => Self {
                rsi_fast: Some(RSI_FAST),
                macd_fast: Some(MACD_FAST),
                ..base
            },
            ParameterSetName::TightChannel => Self {
                bollinger_tight: Some(BOLLINGER_TIGHT),
                ..base
            },
            ParameterSetName::WideChannel => Self {
                bollinger_wide: Some(BOLLINGER_WIDE),
                ..base
            },
            ParameterSetName::TrendFollowing => {
                let mut set = Self {
                    signals: SignalFamilies {
                        trend: Some(TREND_SIGNALS),
                        ..SignalFamilies::default()
                    },
                    ..base
                };
                set.sma_windows.push(LONG_TERM_WINDOW);
                set.ema_windows.extend(SHORT_TERM_EMA);
                set
            }
            ParameterSetName::Momentum => Self {
                signals: SignalFamilies {
                    momentum: true,
                    ..SignalFamilies::default()
                },
                ..base
            },
            ParameterSetName::Volatility => Self {
                bollinger_tight: Some(BOLLINGER_TIGHT),
                keltner: Some(KELTNER),
                signals: SignalFamilies {
                    volatility: true,
                    ..SignalFamilies::default()
                },
                ..base
            },
            ParameterSetName::Ichimoku => Self {
                ichimoku: Some(ICHIMOKU),
                signals: SignalFamilies {
                    multi_timeframe: true,
                    ..SignalFamilies::default()
                },
                ..base
            },
        }
    }

    /// Resolve a user-supplied name, falling back to `default` when unknown.
    pub fn resolve(requested: &str) -> Resolution {
        let (name, fell_back) = match requested.parse::<ParameterSetName>() {
            Ok(name) => (name, false),
            Err(_) => (ParameterSetName::Default, true),
        };
        Resolution {
            set: Self::named(name),
            requested: requested.to_string(),
            fell_back,
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::named(ParameterSetName::Default)
    }
}
