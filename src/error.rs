// =============================================================================
// Engine errors
// =============================================================================
//
// Only malformed input tables are errors.  Short histories, gaps and zero
// denominators are not: they surface as undefined (`None`) indicator values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// One of the mandatory price columns (`High`, `Low`, `Close`) is absent.
    #[error("required column {0} not found in price table")]
    MissingColumn(&'static str),

    /// A column does not have one value per timestamp.
    #[error("column {column} has {actual} rows but the index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Timestamps must be unique and strictly increasing.
    #[error("timestamp index is not strictly increasing at position {position}")]
    UnsortedIndex { position: usize },

    /// Returned by `ParameterSetName::from_str`; `ParameterSet::resolve`
    /// never surfaces it and falls back to `default` instead.
    #[error("unknown parameter set: {0}")]
    UnknownParameterSet(String),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
