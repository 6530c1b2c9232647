// =============================================================================
// Composite Classifications
// =============================================================================
//
// Turns scores and raw indicator values into the labelled classes consumed by
// report collaborators.  Every class has a fixed string form used as the
// label column value.

use std::fmt;

use serde::Serialize;

pub const ADX_VERY_STRONG: f64 = 30.0;
pub const ADX_STRONG: f64 = 25.0;
pub const ADX_MODERATE: f64 = 20.0;
pub const ATR_PERCENT_HIGH: f64 = 2.0;

macro_rules! labelled {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// ADX-based trend strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

labelled!(TrendStrength {
    Weak => "Weak",
    Moderate => "Moderate",
    Strong => "Strong",
    VeryStrong => "Very Strong",
});

impl TrendStrength {
    /// > 30 Very Strong, > 25 Strong, > 20 Moderate, else Weak.
    pub fn from_adx(adx: f64) -> Self {
        if adx > ADX_VERY_STRONG {
            Self::VeryStrong
        } else if adx > ADX_STRONG {
            Self::Strong
        } else if adx > ADX_MODERATE {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Five-level directional class of a summed score (momentum, Ichimoku).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreClass {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

labelled!(ScoreClass {
    StrongBullish => "STRONG BULLISH",
    Bullish => "BULLISH",
    Neutral => "NEUTRAL",
    Bearish => "BEARISH",
    StrongBearish => "STRONG BEARISH",
});

impl ScoreClass {
    pub fn from_score(score: i8) -> Self {
        match score {
            s if s >= 2 => Self::StrongBullish,
            s if s <= -2 => Self::StrongBearish,
            s if s > 0 => Self::Bullish,
            s if s < 0 => Self::Bearish,
            _ => Self::Neutral,
        }
    }
}

/// Overall trend read combining the SMA and EMA crosses with ADX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendSignal {
    StrongBullish,
    Bullish,
    Mixed,
    Bearish,
    StrongBearish,
}

labelled!(TrendSignal {
    StrongBullish => "STRONG BULLISH",
    Bullish => "BULLISH",
    Mixed => "MIXED",
    Bearish => "BEARISH",
    StrongBearish => "STRONG BEARISH",
});

impl TrendSignal {
    pub fn classify(sma_cross: i8, ema_cross: i8, adx: f64) -> Self {
        let strong = adx > ADX_STRONG;
        match (sma_cross, ema_cross) {
            (1, 1) if strong => Self::StrongBullish,
            (-1, -1) if strong => Self::StrongBearish,
            (1, 1) => Self::Bullish,
            (-1, -1) => Self::Bearish,
            _ => Self::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolatilityStatus {
    /// Bollinger squeeze: potential breakout setup.
    Low,
    /// ATR above 2 % of price: trending market.
    High,
    Normal,
}

labelled!(VolatilityStatus {
    Low => "LOW",
    High => "HIGH",
    Normal => "NORMAL",
});

impl VolatilityStatus {
    /// A squeeze wins over ATR%; without a squeeze the ATR% must be known.
    pub fn classify(squeeze: bool, atr_percent: Option<f64>) -> Option<Self> {
        if squeeze {
            return Some(Self::Low);
        }
        Some(if atr_percent? > ATR_PERCENT_HIGH {
            Self::High
        } else {
            Self::Normal
        })
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Low => "Potential breakout setup",
            Self::High => "Trending market",
            Self::Normal => "Normal volatility",
        }
    }
}

/// Simple three-way read used for the moving-average trend summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bias {
    Bullish,
    Neutral,
    Bearish,
}

labelled!(Bias {
    Bullish => "BULLISH",
    Neutral => "NEUTRAL",
    Bearish => "BEARISH",
});

impl Bias {
    /// Bullish when `values` is strictly decreasing (e.g. close > SMA20 >
    /// SMA50), bearish when strictly increasing, neutral otherwise.
    pub fn from_ladder(values: &[f64]) -> Self {
        if values.windows(2).all(|w| w[0] > w[1]) {
            Self::Bullish
        } else if values.windows(2).all(|w| w[0] < w[1]) {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_strength_thresholds() {
        assert_eq!(TrendStrength::from_adx(35.0), TrendStrength::VeryStrong);
        assert_eq!(TrendStrength::from_adx(30.0), TrendStrength::Strong);
        assert_eq!(TrendStrength::from_adx(25.0), TrendStrength::Moderate);
        assert_eq!(TrendStrength::from_adx(20.0), TrendStrength::Weak);
        assert_eq!(TrendStrength::VeryStrong.as_str(), "Very Strong");
    }

    #[test]
    fn score_classes() {
        assert_eq!(ScoreClass::from_score(3), ScoreClass::StrongBullish);
        assert_eq!(ScoreClass::from_score(2), ScoreClass::StrongBullish);
        assert_eq!(ScoreClass::from_score(1), ScoreClass::Bullish);
        assert_eq!(ScoreClass::from_score(0), ScoreClass::Neutral);
        assert_eq!(ScoreClass::from_score(-1), ScoreClass::Bearish);
        assert_eq!(ScoreClass::from_score(-3), ScoreClass::StrongBearish);
        assert_eq!(ScoreClass::StrongBearish.to_string(), "STRONG BEARISH");
    }

    #[test]
    fn trend_signal_needs_agreement() {
        assert_eq!(TrendSignal::classify(1, 1, 30.0), TrendSignal::StrongBullish);
        assert_eq!(TrendSignal::classify(1, 1, 20.0), TrendSignal::Bullish);
        assert_eq!(TrendSignal::classify(-1, -1, 26.0), TrendSignal::StrongBearish);
        assert_eq!(TrendSignal::classify(1, -1, 50.0), TrendSignal::Mixed);
    }

    #[test]
    fn squeeze_wins_over_atr() {
        assert_eq!(VolatilityStatus::classify(true, Some(5.0)), Some(VolatilityStatus::Low));
        assert_eq!(VolatilityStatus::classify(true, None), Some(VolatilityStatus::Low));
        assert_eq!(VolatilityStatus::classify(false, Some(2.5)), Some(VolatilityStatus::High));
        assert_eq!(VolatilityStatus::classify(false, Some(2.0)), Some(VolatilityStatus::Normal));
        assert_eq!(VolatilityStatus::classify(false, None), None);
    }

    #[test]
    fn bias_from_ladder() {
        assert_eq!(Bias::from_ladder(&[3.0, 2.0, 1.0]), Bias::Bullish);
        assert_eq!(Bias::from_ladder(&[1.0, 2.0, 3.0]), Bias::Bearish);
        assert_eq!(Bias::from_ladder(&[2.0, 3.0, 1.0]), Bias::Neutral);
        assert_eq!(Bias::from_ladder(&[2.0, 2.0]), Bias::Neutral);
    }
}
