// =============================================================================
// ta-engine — Main Entry Point
// =============================================================================
//
// Reads a JSON array of bars, computes the configured parameter set and prints
// the enriched frame (or the latest signal snapshot) as JSON on stdout.
// =============================================================================

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ta_engine::runtime_config::{EngineConfig, DEFAULT_CONFIG_PATH};
use ta_engine::{compute_indicators, Bar, PriceTable, SignalSnapshot};

fn main() -> Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = EngineConfig::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });
    config.apply_overrides(|key| std::env::var(key).ok());

    info!(
        parameter_set = %config.parameter_set,
        input = %config.input_path.display(),
        latest_only = config.latest_only,
        "Engine configured"
    );

    // ── 2. Load bars ─────────────────────────────────────────────────────
    let raw = std::fs::read_to_string(&config.input_path)
        .with_context(|| format!("failed to read bars from {}", config.input_path.display()))?;
    let bars: Vec<Bar> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse bars from {}", config.input_path.display()))?;
    info!(bars = bars.len(), "Bars loaded");

    // ── 3. Compute ───────────────────────────────────────────────────────
    let table = PriceTable::from_bars(&bars);
    let frame = compute_indicators(&table, &config.parameter_set)
        .context("indicator computation failed")?;

    // ── 4. Output ────────────────────────────────────────────────────────
    let rendered = if config.latest_only {
        serde_json::to_string_pretty(&SignalSnapshot::latest(&frame))
    } else {
        serde_json::to_string_pretty(&frame)
    };
    let output = rendered.context("failed to serialise output")?;
    println!("{output}");

    info!(
        parameter_set = %frame.parameters().name,
        fallback = frame.parameter_fallback(),
        columns = frame.columns().len(),
        "Done"
    );
    Ok(())
}
