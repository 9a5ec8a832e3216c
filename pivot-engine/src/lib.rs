//! FILENAME: pivot-engine/src/lib.rs
//! Grouped-record pivot engine.
//!
//! Turns flat, tagged records (string field -> string value) into a dense
//! table: one row per observed combination of identifier values, one column
//! per declared transform label, plus trend/total columns and a footer.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the table IS)
//! - `key`: Canonical row keys (how rows are identified)
//! - `cache`: Unique identifier values per field (what rows CAN exist)
//! - `filter`: Named record/row filters
//! - `engine`: Calculation pipeline (HOW we calculate)
//! - `totals`: Row totals, trend, and footer aggregation
//! - `view`: Renderable output for report pages (WHAT we display)

use std::collections::HashMap;

pub mod cache;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod key;
pub mod totals;
pub mod view;

/// A flat input record: field name -> value. All values are strings.
pub type Record = HashMap<String, String>;

pub use cache::{DimensionValueSets, FieldValues};
pub use definition::*;
pub use engine::{
    build_skeleton, calculate_table, generate_combinations, populate, prune, render_row, Cell,
    DataColumns, PivotBody, PivotCalculator, PivotRow, PopulateStats,
};
pub use error::{PivotError, Result};
pub use filter::{FieldFilter, FilterCondition, FilterSet};
pub use key::{canonical_fields, CanonicalKey};
pub use totals::{column_totals, format_general, parse_cell, row_total, row_total_value};
pub use view::{Footer, PivotTable, TableRow};
