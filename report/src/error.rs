//! FILENAME: report/src/error.rs

use pivot_engine::PivotError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pivot error: {0}")]
    Pivot(#[from] PivotError),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Source '{source_name}' failed: {message}")]
    Source { source_name: String, message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
