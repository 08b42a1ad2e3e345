use thiserror::Error;

/// Input defects that stop a run before any verdict is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Invalid compilation unit `{unit}`: {reason}")]
    InvalidUnit { unit: String, reason: String },

    #[error("Symbol `{symbol}` is defined by both `{first}` and `{second}`")]
    DuplicateSymbol {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("Unit `{unit}` references unknown symbol `{symbol}`")]
    UnresolvedSymbol { unit: String, symbol: String },
}

impl AnalysisError {
    pub fn invalid_unit(unit: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUnit {
            unit: unit.to_string(),
            reason: reason.into(),
        }
    }
}
