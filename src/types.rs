// =============================================================================
// Shared types used across the indicator engine
// =============================================================================
//
// Price data enters the engine as a column-oriented `PriceTable` (the shape a
// data loader hands over) and is validated into a `BarSeries`, which is what
// every indicator consumes.  A missing value is `None` everywhere; non-finite
// inputs are normalised to `None` on ingest.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};

/// A numeric series aligned 1:1 with the price index.  `None` means undefined.
pub type Series = Vec<Option<f64>>;

/// A categorical series with values in a small domain such as {-1, 0, 1}.
pub type SignalSeries = Vec<Option<i8>>;

pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";

/// A single OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Column-oriented price table keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    pub index: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl PriceTable {
    pub fn new(index: Vec<DateTime<Utc>>) -> Self {
        Self {
            index,
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style column insertion; replaces an existing column of the same name.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    /// Build a full five-column table from bars.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let column = |f: fn(&Bar) -> f64| bars.iter().map(|b| Some(f(b))).collect::<Series>();
        Self::new(bars.iter().map(|b| b.timestamp).collect())
            .with_column(OPEN, column(|b| b.open))
            .with_column(HIGH, column(|b| b.high))
            .with_column(LOW, column(|b| b.low))
            .with_column(CLOSE, column(|b| b.close))
            .with_column(VOLUME, column(|b| b.volume))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Validated, column-major OHLCV data.
///
/// `open` is all-`None` when the table had no `Open` column; `volume` is all
/// zero when the table had no `Volume` column.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub index: Vec<DateTime<Utc>>,
    pub open: Series,
    pub high: Series,
    pub low: Series,
    pub close: Series,
    pub volume: Series,
}

impl BarSeries {
    /// Validate a price table.
    ///
    /// Fails fast on the first missing mandatory column (checked in the order
    /// `High`, `Low`, `Close`), on any column whose length differs from the
    /// index, and on a non-increasing index.
    pub fn from_table(table: &PriceTable) -> Result<Self> {
        let n = table.index.len();

        for (name, values) in &table.columns {
            if values.len() != n {
                return Err(IndicatorError::LengthMismatch {
                    column: name.clone(),
                    expected: n,
                    actual: values.len(),
                });
            }
        }

        let required = |name: &'static str| -> Result<Series> {
            table
                .columns
                .get(name)
                .map(|values| normalise(values))
                .ok_or(IndicatorError::MissingColumn(name))
        };
        let high = required(HIGH)?;
        let low = required(LOW)?;
        let close = required(CLOSE)?;

        if let Some(position) = table.index.windows(2).position(|w| w[1] <= w[0]) {
            return Err(IndicatorError::UnsortedIndex {
                position: position + 1,
            });
        }

        let open = table
            .columns
            .get(OPEN)
            .map(|values| normalise(values))
            .unwrap_or_else(|| vec![None; n]);
        let volume = table
            .columns
            .get(VOLUME)
            .map(|values| normalise(values))
            .unwrap_or_else(|| vec![Some(0.0); n]);

        Ok(Self {
            index: table.index.clone(),
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub fn from_bars(bars: &[Bar]) -> Result<Self> {
        Self::from_table(&PriceTable::from_bars(bars))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn normalise(values: &[Option<f64>]) -> Series {
    values.iter().map(|v| v.filter(|x| x.is_finite())).collect()
}
