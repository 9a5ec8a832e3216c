//! FILENAME: pivot-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("Malformed row key {key:?}: {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Conflicting writes to cell [{key}][{column}]")]
    CellConflict { key: String, column: String },

    #[error("Invalid pivot definition: {0}")]
    InvalidDefinition(String),
}

pub type Result<T> = std::result::Result<T, PivotError>;
