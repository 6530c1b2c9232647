// =============================================================================
// Signals Module
// =============================================================================
//
// Categorical reads layered on top of the indicator series:
// - Directional per-bar signals (crosses, RSI zones, squeeze, cloud position)
// - Composite classes (trend strength, score classes, volatility status)
// - Row snapshots for report consumers

pub mod composite;
pub mod directional;
pub mod snapshot;

pub use composite::{Bias, ScoreClass, TrendSignal, TrendStrength, VolatilityStatus};
pub use snapshot::SignalSnapshot;
