// =============================================================================
// ta-engine — OHLCV technical indicator engine
// =============================================================================
//
// `compute_indicators(table, parameter_set)` validates a price table, resolves
// a named parameter set and returns the table enriched with indicator and
// signal columns.
// =============================================================================

pub mod engine;
pub mod error;
pub mod frame;
pub mod indicators;
pub mod params;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use engine::{compute_indicators, compute_with_parameters};
pub use error::IndicatorError;
pub use frame::{Cell, ColumnData, IndicatorFrame, NamedColumn};
pub use params::{ParameterSet, ParameterSetName, Resolution};
pub use signals::SignalSnapshot;
pub use types::{Bar, BarSeries, PriceTable, Series, SignalSeries};
