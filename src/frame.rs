// =============================================================================
// IndicatorFrame — the enriched output table
// =============================================================================
//
// The input OHLCV columns followed by one column per computed indicator or
// signal, in a fixed insertion order.  Every column has exactly one value per
// index row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::params::{ParameterSet, ParameterSetName, Resolution};
use crate::types::{Series, SignalSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Float(Series),
    Signal(SignalSeries),
    Label(Vec<Option<&'static str>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Signal(v) => v.len(),
            Self::Label(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, row: usize) -> Cell {
        match self {
            Self::Float(v) => Cell::Float(v[row]),
            Self::Signal(v) => Cell::Signal(v[row]),
            Self::Label(v) => Cell::Label(v[row]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedColumn {
    pub name: String,
    pub data: ColumnData,
}

/// One value of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Float(Option<f64>),
    Signal(Option<i8>),
    Label(Option<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    index: Vec<DateTime<Utc>>,
    parameter_set: ParameterSetName,
    requested_parameter_set: String,
    parameter_fallback: bool,
    columns: Vec<NamedColumn>,
    #[serde(skip)]
    parameters: ParameterSet,
}

impl IndicatorFrame {
    pub fn new(index: Vec<DateTime<Utc>>, resolution: Resolution) -> Self {
        Self {
            index,
            parameter_set: resolution.set.name,
            requested_parameter_set: resolution.requested,
            parameter_fallback: resolution.fell_back,
            columns: Vec::new(),
            parameters: resolution.set,
        }
    }

    fn push(&mut self, name: impl Into<String>, data: ColumnData) {
        let name = name.into();
        debug_assert_eq!(data.len(), self.index.len(), "column {name} misaligned");
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.data = data,
            None => self.columns.push(NamedColumn { name, data }),
        }
    }

    pub fn push_float(&mut self, name: impl Into<String>, values: Series) {
        self.push(name, ColumnData::Float(values));
    }

    pub fn push_signal(&mut self, name: impl Into<String>, values: SignalSeries) {
        self.push(name, ColumnData::Signal(values));
    }

    pub fn push_label(&mut self, name: impl Into<String>, values: Vec<Option<&'static str>>) {
        self.push(name, ColumnData::Label(values));
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The parameter set actually used.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn requested_parameter_set(&self) -> &str {
        &self.requested_parameter_set
    }

    /// `true` when the requested set was unknown and `default` was used.
    pub fn parameter_fallback(&self) -> bool {
        self.parameter_fallback
    }

    pub fn columns(&self) -> &[NamedColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    pub fn float(&self, name: &str) -> Option<&[Option<f64>]> {
        match self.column(name)? {
            ColumnData::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn signal(&self, name: &str) -> Option<&[Option<i8>]> {
        match self.column(name)? {
            ColumnData::Signal(v) => Some(v),
            _ => None,
        }
    }

    pub fn label(&self, name: &str) -> Option<&[Option<&'static str>]> {
        match self.column(name)? {
            ColumnData::Label(v) => Some(v),
            _ => None,
        }
    }

    /// Position of the most recent row.
    pub fn latest_row(&self) -> Option<usize> {
        self.index.len().checked_sub(1)
    }

    /// All `(column, value)` pairs of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<(&str, Cell)>> {
        (row < self.index.len()).then(|| {
            self.columns
                .iter()
                .map(|c| (c.name.as_str(), c.data.cell(row)))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frame(n: usize) -> IndicatorFrame {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let index = (0..n).map(|i| start + chrono::Duration::hours(i as i64)).collect();
        IndicatorFrame::new(index, ParameterSet::resolve("momentum"))
    }

    #[test]
    fn typed_accessors() {
        let mut f = frame(2);
        f.push_float("RSI", vec![None, Some(55.0)]);
        f.push_signal("RSI_Signal", vec![None, Some(0)]);
        f.push_label("Momentum_Signal", vec![None, Some("NEUTRAL")]);

        assert_eq!(f.float("RSI"), Some(&[None, Some(55.0)][..]));
        assert_eq!(f.signal("RSI_Signal"), Some(&[None, Some(0)][..]));
        assert_eq!(f.label("Momentum_Signal").unwrap()[1], Some("NEUTRAL"));
        assert!(f.float("RSI_Signal").is_none());
        assert!(f.column("missing").is_none());
    }

    #[test]
    fn pushing_existing_name_replaces_in_place() {
        let mut f = frame(1);
        f.push_float("A", vec![Some(1.0)]);
        f.push_float("B", vec![Some(2.0)]);
        f.push_float("A", vec![Some(3.0)]);
        assert_eq!(f.column_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(f.float("A"), Some(&[Some(3.0)][..]));
    }

    #[test]
    fn latest_row_and_row_cells() {
        let mut f = frame(3);
        f.push_float("Close", vec![Some(1.0), Some(2.0), Some(3.0)]);
        f.push_signal("S", vec![Some(1), Some(-1), None]);
        assert_eq!(f.latest_row(), Some(2));
        let row = f.row(2).unwrap();
        assert_eq!(row, vec![("Close", Cell::Float(Some(3.0))), ("S", Cell::Signal(None))]);
        assert!(f.row(3).is_none());
        assert_eq!(frame(0).latest_row(), None);
    }

    #[test]
    fn serialises_columns_with_kind_tags() {
        let mut f = frame(1);
        f.push_signal("S", vec![Some(1)]);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["parameter_set"], "momentum");
        assert_eq!(json["parameter_fallback"], false);
        assert_eq!(json["columns"][0]["data"]["kind"], "signal");
        assert_eq!(json["columns"][0]["data"]["values"][0], 1);
    }
}
