//! FILENAME: report/src/source.rs
//! File-backed data source: a persisted API response on disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ReportError, Result};
use crate::page::DataSource;
use crate::response::ApiResponse;

/// Reads one API response (JSON) from `path` every time it is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    name: String,
    preset: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(name: impl Into<String>, preset: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        FileSource {
            name: name.into(),
            preset: preset.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, message: impl fmt::Display) -> ReportError {
        ReportError::Source {
            source_name: self.name.clone(),
            message: format!("{}: {}", self.path.display(), message),
        }
    }
}

impl DataSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn preset(&self) -> &str {
        &self.preset
    }

    fn fetch(&self) -> Result<ApiResponse> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.failure(e))?;
        ApiResponse::from_json(&text).map_err(|e| self.failure(e))
    }
}

/// Parses `name=preset:path`.
impl FromStr for FileSource {
    type Err = ReportError;

    fn from_str(spec: &str) -> Result<Self> {
        let invalid = || ReportError::Source {
            source_name: spec.to_string(),
            message: "expected name=preset:path".to_string(),
        };

        let (name, rest) = spec.split_once('=').ok_or_else(invalid)?;
        let (preset, path) = rest.split_once(':').ok_or_else(invalid)?;
        if name.is_empty() || preset.is_empty() || path.is_empty() {
            return Err(invalid());
        }

        Ok(FileSource::new(name, preset, path))
    }
}
