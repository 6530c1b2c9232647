// =============================================================================
// Indicator Engine — compute_indicators
// =============================================================================
//
// Maps an OHLCV table plus a named parameter set to the enriched table.
// Data flows strictly upward: bars -> primitives -> indicator families ->
// signals.  The input is never mutated and nothing is cached between calls,
// so identical input and set name always give identical output.
// =============================================================================

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::frame::IndicatorFrame;
use crate::indicators::adx::calculate_adx;
use crate::indicators::atr::{calculate_atr, calculate_atr_pct};
use crate::indicators::bollinger::{calculate_bollinger, BollingerOutput};
use crate::indicators::ema::calculate_ema;
use crate::indicators::ichimoku::calculate_ichimoku;
use crate::indicators::keltner::calculate_keltner;
use crate::indicators::macd::{calculate_macd, MacdOutput};
use crate::indicators::obv::calculate_obv;
use crate::indicators::psar::calculate_psar;
use crate::indicators::rolling::sma;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::stochastic::calculate_stochastic;
use crate::params::{BollingerParams, MacdParams, ParameterSet, Resolution};
use crate::signals::composite::{ScoreClass, TrendSignal, TrendStrength, VolatilityStatus};
use crate::signals::directional;
use crate::types::{BarSeries, PriceTable, Series, SignalSeries};

/// Fixed output column names.
pub mod columns {
    pub use crate::types::{CLOSE, HIGH, LOW, OPEN, VOLUME};

    pub const ATR: &str = "ATR";
    pub const SAR: &str = "SAR";
    pub const STOCH_K: &str = "STOCH_K";
    pub const STOCH_D: &str = "STOCH_D";
    pub const ADX: &str = "ADX";
    pub const PDI: &str = "PDI";
    pub const NDI: &str = "NDI";
    pub const OBV: &str = "OBV";
    pub const OBV_MA: &str = "OBV_MA";

    pub const KELTNER_HIGH: &str = "Keltner_High";
    pub const KELTNER_MID: &str = "Keltner_Mid";
    pub const KELTNER_LOW: &str = "Keltner_Low";

    pub const ICHIMOKU_TENKAN: &str = "Ichimoku_Tenkan";
    pub const ICHIMOKU_KIJUN: &str = "Ichimoku_Kijun";
    pub const ICHIMOKU_SPAN_A: &str = "Ichimoku_SpanA";
    pub const ICHIMOKU_SPAN_B: &str = "Ichimoku_SpanB";
    pub const ICHIMOKU_CHIKOU: &str = "Ichimoku_Chikou";

    pub const SMA_CROSS: &str = "SMA_Cross_Signal";
    pub const EMA_CROSS: &str = "EMA_Cross_Signal";
    pub const TREND_STRENGTH: &str = "Trend_Strength";
    pub const TREND_SIGNAL: &str = "Trend_Signal";

    pub const RSI_SIGNAL: &str = "RSI_Signal";
    pub const MACD_CROSS: &str = "MACD_Cross_Signal";
    pub const STOCH_SIGNAL: &str = "Stoch_Signal";
    pub const MOMENTUM_SCORE: &str = "Momentum_Score";
    pub const MOMENTUM_SIGNAL: &str = "Momentum_Signal";

    pub const BB_SQUEEZE: &str = "BB_Squeeze";
    pub const BB_WIDTH: &str = "BB_Width";
    pub const ATR_PERCENT: &str = "ATR_Percent";
    pub const VOLATILITY_STATUS: &str = "Volatility_Status";

    pub const CLOUD_DIRECTION: &str = "Cloud_Direction";
    pub const SAR_SIGNAL: &str = "SAR_Signal";
    pub const OBV_SIGNAL: &str = "OBV_Signal";
    pub const ICHIMOKU_SCORE: &str = "Ichimoku_Score";
    pub const ICHIMOKU_SIGNAL: &str = "Ichimoku_Signal";

    pub fn sma(window: usize) -> String {
        format!("SMA{window}")
    }

    pub fn ema(window: usize) -> String {
        format!("EMA{window}")
    }
}

/// Validate `table`, resolve `parameter_set` and compute every enabled
/// indicator and signal.
///
/// An unknown `parameter_set` falls back to `default`; the fallback is logged
/// and reported by [`IndicatorFrame::parameter_fallback`].
pub fn compute_indicators(table: &PriceTable, parameter_set: &str) -> Result<IndicatorFrame> {
    let bars = BarSeries::from_table(table)?;
    let resolution = ParameterSet::resolve(parameter_set);
    if resolution.fell_back {
        warn!(
            requested = parameter_set,
            fallback = %resolution.set.name,
            "unknown parameter set, using default"
        );
    }
    Ok(compute_with_parameters(&bars, resolution))
}

/// Compute on already-validated bars with an explicit parameter set.
pub fn compute_with_parameters(bars: &BarSeries, resolution: Resolution) -> IndicatorFrame {
    let set = resolution.set.clone();
    let mut frame = IndicatorFrame::new(bars.index.clone(), resolution);

    frame.push_float(columns::OPEN, bars.open.clone());
    frame.push_float(columns::HIGH, bars.high.clone());
    frame.push_float(columns::LOW, bars.low.clone());
    frame.push_float(columns::CLOSE, bars.close.clone());
    frame.push_float(columns::VOLUME, bars.volume.clone());

    let close = &bars.close;

    // --- Moving averages ----------------------------------------------------
    let mut sma_by_window: BTreeMap<usize, Series> = BTreeMap::new();
    for &window in &set.sma_windows {
        let values = sma_by_window
            .entry(window)
            .or_insert_with(|| sma(close, window))
            .clone();
        frame.push_float(columns::sma(window), values);
    }
    let mut ema_by_window: BTreeMap<usize, Series> = BTreeMap::new();
    for &window in &set.ema_windows {
        let values = ema_by_window
            .entry(window)
            .or_insert_with(|| calculate_ema(close, window))
            .clone();
        frame.push_float(columns::ema(window), values);
    }

    // --- Oscillators --------------------------------------------------------
    let rsi = calculate_rsi(close, set.rsi.length);
    frame.push_float(set.rsi.column, rsi.clone());
    if let Some(params) = set.rsi_fast {
        frame.push_float(params.column, calculate_rsi(close, params.length));
    }

    let macd = calculate_macd(close, set.macd.fast, set.macd.slow, set.macd.signal);
    push_macd(&mut frame, &set.macd, &macd);
    if let Some(params) = &set.macd_fast {
        let out = calculate_macd(close, params.fast, params.slow, params.signal);
        push_macd(&mut frame, params, &out);
    }

    // --- Volatility ---------------------------------------------------------
    let bollinger = calculate_bollinger(close, set.bollinger.length, set.bollinger.std_mult);
    push_bollinger(&mut frame, &set.bollinger, &bollinger);
    for params in [set.bollinger_tight, set.bollinger_wide].iter().flatten() {
        let out = calculate_bollinger(close, params.length, params.std_mult);
        push_bollinger(&mut frame, params, &out);
    }

    let atr = calculate_atr(&bars.high, &bars.low, close, set.atr_length);
    frame.push_float(columns::ATR, atr.clone());

    // --- Trend --------------------------------------------------------------
    let psar = calculate_psar(&bars.high, &bars.low, &set.psar);
    frame.push_float(columns::SAR, psar.sar.clone());

    let stoch = calculate_stochastic(
        &bars.high,
        &bars.low,
        close,
        set.stochastic.k,
        set.stochastic.d,
        set.stochastic.smooth_k,
    );
    frame.push_float(columns::STOCH_K, stoch.k.clone());
    frame.push_float(columns::STOCH_D, stoch.d.clone());

    let adx = calculate_adx(&bars.high, &bars.low, close, set.adx_length);
    frame.push_float(columns::ADX, adx.adx.clone());
    frame.push_float(columns::PDI, adx.plus_di);
    frame.push_float(columns::NDI, adx.minus_di);

    // --- Volume -------------------------------------------------------------
    let obv = calculate_obv(close, &bars.volume);
    let obv_ma = sma(&obv, set.obv_ma_length);
    frame.push_float(columns::OBV, obv.clone());
    frame.push_float(columns::OBV_MA, obv_ma.clone());

    // --- Optional channels --------------------------------------------------
    let keltner = set
        .keltner
        .map(|params| calculate_keltner(close, &atr, params.ema_length, params.atr_mult));
    if let Some(kc) = &keltner {
        frame.push_float(columns::KELTNER_HIGH, kc.upper.clone());
        frame.push_float(columns::KELTNER_MID, kc.middle.clone());
        frame.push_float(columns::KELTNER_LOW, kc.lower.clone());
    }

    let ichimoku = set.ichimoku.map(|params| {
        calculate_ichimoku(
            &bars.high,
            &bars.low,
            close,
            params.tenkan,
            params.kijun,
            params.senkou,
        )
    });
    if let Some(ich) = &ichimoku {
        frame.push_float(columns::ICHIMOKU_TENKAN, ich.tenkan.clone());
        frame.push_float(columns::ICHIMOKU_KIJUN, ich.kijun.clone());
        frame.push_float(columns::ICHIMOKU_SPAN_A, ich.span_a.clone());
        frame.push_float(columns::ICHIMOKU_SPAN_B, ich.span_b.clone());
        frame.push_float(columns::ICHIMOKU_CHIKOU, ich.chikou.clone());
    }

    // --- Signals ------------------------------------------------------------
    if let Some(trend) = set.signals.trend {
        let sma_of = |w: usize| sma_by_window.get(&w).cloned().unwrap_or_else(|| sma(close, w));
        let ema_of = |w: usize| {
            ema_by_window
                .get(&w)
                .cloned()
                .unwrap_or_else(|| calculate_ema(close, w))
        };
        let sma_cross = directional::cross_series(&sma_of(trend.sma_fast), &sma_of(trend.sma_slow));
        let ema_cross = directional::cross_series(&ema_of(trend.ema_fast), &ema_of(trend.ema_slow));

        let strength = adx
            .adx
            .iter()
            .map(|v| v.map(|a| TrendStrength::from_adx(a).as_str()))
            .collect();
        let overall = (0..bars.len())
            .map(|i| match (sma_cross[i], ema_cross[i], adx.adx[i]) {
                (Some(s), Some(e), Some(a)) => Some(TrendSignal::classify(s, e, a).as_str()),
                _ => None,
            })
            .collect();

        frame.push_signal(columns::SMA_CROSS, sma_cross);
        frame.push_signal(columns::EMA_CROSS, ema_cross);
        frame.push_label(columns::TREND_STRENGTH, strength);
        frame.push_label(columns::TREND_SIGNAL, overall);
    }

    if set.signals.momentum {
        let rsi_signal = directional::rsi_series(&rsi);
        let macd_cross = directional::cross_series(&macd.macd, &macd.signal);
        let stoch_signal = directional::stochastic_series(&stoch.k, &stoch.d);
        let score = directional::sum_series(&[&rsi_signal, &macd_cross, &stoch_signal]);
        let class = score_labels(&score);

        frame.push_signal(columns::RSI_SIGNAL, rsi_signal);
        frame.push_signal(columns::MACD_CROSS, macd_cross);
        frame.push_signal(columns::STOCH_SIGNAL, stoch_signal);
        frame.push_signal(columns::MOMENTUM_SCORE, score);
        frame.push_label(columns::MOMENTUM_SIGNAL, class);
    }

    if let Some(kc) = keltner.as_ref().filter(|_| set.signals.volatility) {
        let squeeze: SignalSeries = (0..bars.len())
            .map(|i| {
                directional::squeeze(bollinger.upper[i], bollinger.lower[i], kc.upper[i], kc.lower[i])
            })
            .collect();
        let atr_percent = calculate_atr_pct(&atr, close);
        let status = squeeze
            .iter()
            .zip(&atr_percent)
            .map(|(s, pct)| {
                (*s).and_then(|s| VolatilityStatus::classify(s == 1, *pct))
                    .map(VolatilityStatus::as_str)
            })
            .collect();

        frame.push_signal(columns::BB_SQUEEZE, squeeze);
        frame.push_float(columns::BB_WIDTH, bollinger.width());
        frame.push_float(columns::ATR_PERCENT, atr_percent);
        frame.push_label(columns::VOLATILITY_STATUS, status);
    }

    if let Some(ich) = ichimoku.as_ref().filter(|_| set.signals.multi_timeframe) {
        let cloud: SignalSeries = (0..bars.len())
            .map(|i| directional::cloud_direction(close[i], ich.span_a[i], ich.span_b[i]))
            .collect();
        let sar_signal = directional::cross_series(close, &psar.sar);
        let obv_signal = directional::cross_series(&obv, &obv_ma);
        let score = directional::sum_series(&[&cloud, &sar_signal, &obv_signal]);
        let class = score_labels(&score);

        frame.push_signal(columns::CLOUD_DIRECTION, cloud);
        frame.push_signal(columns::SAR_SIGNAL, sar_signal);
        frame.push_signal(columns::OBV_SIGNAL, obv_signal);
        frame.push_signal(columns::ICHIMOKU_SCORE, score);
        frame.push_label(columns::ICHIMOKU_SIGNAL, class);
    }

    debug!(
        parameter_set = %set.name,
        bars = bars.len(),
        columns = frame.columns().len(),
        "indicators computed"
    );

    frame
}

fn push_macd(frame: &mut IndicatorFrame, params: &MacdParams, out: &MacdOutput) {
    frame.push_float(params.prefix, out.macd.clone());
    frame.push_float(format!("{}_Signal", params.prefix), out.signal.clone());
    frame.push_float(format!("{}_Histogram", params.prefix), out.histogram.clone());
}

fn push_bollinger(frame: &mut IndicatorFrame, params: &BollingerParams, bands: &BollingerOutput) {
    frame.push_float(format!("{}_High", params.prefix), bands.upper.clone());
    frame.push_float(format!("{}_Mid", params.prefix), bands.middle.clone());
    frame.push_float(format!("{}_Low", params.prefix), bands.lower.clone());
}

fn score_labels(score: &[Option<i8>]) -> Vec<Option<&'static str>> {
    score
        .iter()
        .map(|s| s.map(|s| ScoreClass::from_score(s).as_str()))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;
    use crate::types::{Bar, HIGH, LOW};
    use chrono::{Duration, TimeZone, Utc};

    fn wave_bars(n: usize) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.15).sin() * 10.0 + i as f64 * 0.05;
                Bar {
                    timestamp: start + Duration::days(i as i64),
                    open: base - 0.2,
                    high: base + 1.2,
                    low: base - 1.1,
                    close: base + 0.3,
                    volume: 1_000.0 + (i % 7) as f64 * 150.0,
                }
            })
            .collect()
    }

    fn table(n: usize) -> PriceTable {
        PriceTable::from_bars(&wave_bars(n))
    }

    #[test]
    fn missing_column_fails_fast() {
        let mut t = table(30);
        t.columns.remove(LOW);
        assert_eq!(
            compute_indicators(&t, "default").unwrap_err(),
            IndicatorError::MissingColumn(LOW)
        );
    }

    #[test]
    fn every_column_is_aligned_with_the_input() {
        let frame = compute_indicators(&table(250), "default").unwrap();
        assert_eq!(frame.len(), 250);
        for column in frame.columns() {
            assert_eq!(column.data.len(), 250, "column {}", column.name);
        }
    }

    #[test]
    fn input_columns_come_first() {
        let frame = compute_indicators(&table(10), "momentum").unwrap();
        let names: Vec<&str> = frame.column_names().take(5).collect();
        assert_eq!(names, vec!["Open", "High", "Low", "Close", "Volume"]);
    }

    #[test]
    fn unknown_parameter_set_falls_back_to_default() {
        let t = table(80);
        let fallback = compute_indicators(&t, "no_such_set").unwrap();
        let default = compute_indicators(&t, "default").unwrap();
        assert!(fallback.parameter_fallback());
        assert_eq!(fallback.requested_parameter_set(), "no_such_set");
        assert_eq!(fallback.columns(), default.columns());
    }

    #[test]
    fn default_set_produces_every_documented_column() {
        let frame = compute_indicators(&table(80), "default").unwrap();
        let expected = [
            "SMA5", "SMA200", "EMA12", "EMA200", "RSI", "RSI7", "MACD", "MACD_Signal",
            "MACD_Histogram", "MACD_HF", "MACD_HF_Signal", "MACD_HF_Histogram", "BB_High",
            "BB_Mid", "BB_Low", "BB_Tight_High", "BB_Wide_Low", "ATR", "SAR", "STOCH_K",
            "STOCH_D", "ADX", "PDI", "NDI", "OBV", "OBV_MA", "Keltner_High", "Keltner_Mid",
            "Keltner_Low", "Ichimoku_Tenkan", "Ichimoku_Kijun", "Ichimoku_SpanA",
            "Ichimoku_SpanB", "Ichimoku_Chikou", "SMA_Cross_Signal", "EMA_Cross_Signal",
            "Trend_Strength", "Trend_Signal", "RSI_Signal", "MACD_Cross_Signal",
            "Stoch_Signal", "Momentum_Score", "Momentum_Signal", "BB_Squeeze", "BB_Width",
            "ATR_Percent", "Volatility_Status", "Cloud_Direction", "SAR_Signal", "OBV_Signal",
            "Ichimoku_Score", "Ichimoku_Signal",
        ];
        for name in expected {
            assert!(frame.column(name).is_some(), "missing column {name}");
        }
    }

    #[test]
    fn narrow_sets_skip_optional_families() {
        let frame = compute_indicators(&table(80), "tight_channel").unwrap();
        assert!(frame.column("BB_Tight_Mid").is_some());
        assert!(frame.column("BB_Wide_Mid").is_none());
        assert!(frame.column("Keltner_High").is_none());
        assert!(frame.column("Ichimoku_SpanA").is_none());
        assert!(frame.column("Momentum_Score").is_none());
        assert!(frame.column("SMA200").is_none());
        // Base families are always present.
        assert!(frame.column("ADX").is_some() && frame.column("SAR").is_some());
    }

    #[test]
    fn momentum_score_is_sum_of_components() {
        let frame = compute_indicators(&table(120), "momentum").unwrap();
        let rsi = frame.signal("RSI_Signal").unwrap();
        let macd = frame.signal("MACD_Cross_Signal").unwrap();
        let stoch = frame.signal("Stoch_Signal").unwrap();
        let score = frame.signal("Momentum_Score").unwrap();
        for i in 0..120 {
            match (rsi[i], macd[i], stoch[i]) {
                (Some(a), Some(b), Some(c)) => {
                    let s = score[i].unwrap();
                    assert_eq!(s, a + b + c);
                    assert!((-3..=3).contains(&s));
                }
                _ => assert!(score[i].is_none()),
            }
        }
    }

    #[test]
    fn cloud_direction_only_where_both_spans_exist() {
        let frame = compute_indicators(&table(120), "ichimoku").unwrap();
        let span_a = frame.float("Ichimoku_SpanA").unwrap();
        let span_b = frame.float("Ichimoku_SpanB").unwrap();
        let cloud = frame.signal("Cloud_Direction").unwrap();
        for i in 0..120 {
            assert_eq!(cloud[i].is_some(), span_a[i].is_some() && span_b[i].is_some(), "row {i}");
        }
        // Span B is first plotted at 51 + 26.
        assert!(cloud[76].is_none() && cloud[77].is_some());
    }

    #[test]
    fn squeeze_matches_band_nesting() {
        let frame = compute_indicators(&table(120), "volatility").unwrap();
        let bb_high = frame.float("BB_High").unwrap();
        let bb_low = frame.float("BB_Low").unwrap();
        let kc_high = frame.float("Keltner_High").unwrap();
        let kc_low = frame.float("Keltner_Low").unwrap();
        let squeeze = frame.signal("BB_Squeeze").unwrap();
        for i in 19..120 {
            let nested = bb_high[i].unwrap() < kc_high[i].unwrap() && bb_low[i].unwrap() > kc_low[i].unwrap();
            assert_eq!(squeeze[i], Some(i8::from(nested)));
        }
        assert!(squeeze[18].is_none());
    }

    #[test]
    fn missing_volume_gives_flat_obv() {
        let mut t = table(40);
        t.columns.remove("Volume");
        let frame = compute_indicators(&t, "default").unwrap();
        assert!(frame.float("OBV").unwrap().iter().all(|v| *v == Some(0.0)));
        assert!(frame.float("Volume").unwrap().iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn gap_in_history_leaves_dependents_undefined() {
        let mut t = table(60);
        if let Some(high) = t.columns.get_mut(HIGH) {
            high[30] = None;
        }
        let frame = compute_indicators(&t, "default").unwrap();
        assert_eq!(frame.float("SAR").unwrap()[30], None);
        assert_eq!(frame.float("ATR").unwrap()[30], None);
        assert_eq!(frame.float("STOCH_K").unwrap()[30], None);
        // Close-only indicators are unaffected.
        assert!(frame.float("SMA20").unwrap()[30].is_some());
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let t = table(150);
        let first = serde_json::to_string(&compute_indicators(&t, "default").unwrap()).unwrap();
        let second = serde_json::to_string(&compute_indicators(&t, "default").unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bollinger_mid_equals_sma20() {
        let frame = compute_indicators(&table(60), "default").unwrap();
        assert_eq!(frame.float("BB_Mid"), frame.float("SMA20"));
    }

    #[test]
    fn input_table_is_not_mutated() {
        let t = table(50);
        let before = t.clone();
        compute_indicators(&t, "default").unwrap();
        assert_eq!(t, before);
    }

    #[test]
    fn empty_table_is_total() {
        let t = PriceTable::from_bars(&[]);
        let frame = compute_indicators(&t, "default").unwrap();
        assert!(frame.is_empty());
        assert!(frame.columns().iter().all(|c| c.data.is_empty()));
    }
}
