//! FILENAME: report/src/lib.rs
//! Report pages built from pivot tables.
//!
//! - `response`: API responses (grouped flat records)
//! - `config`: named table presets
//! - `dates`: month labels and billing windows
//! - `source`: file-backed data sources
//! - `page`: concurrent page assembly
//! - `logging`: category-tagged logging macros

pub mod logging;

pub mod config;
pub mod dates;
pub mod error;
pub mod page;
pub mod response;
pub mod source;

pub use config::{ReportConfig, TablePreset, COSTS_PRESET, UPTIME_PRESET};
pub use error::{ReportError, Result};
pub use page::{build_page, build_table, DataSource, PageEntry, PageTables};
pub use response::{unparseable_cells, ApiResponse};
pub use source::FileSource;
