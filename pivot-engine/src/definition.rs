//! FILENAME: pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a report table:
//! which fields group records into rows, which field becomes the columns,
//! which field supplies the cell values, and how totals are produced.
//! A definition is an immutable snapshot; the engine never modifies it.

use serde::{Deserialize, Serialize};

use crate::error::{PivotError, Result};
use crate::filter::FilterSet;

/// Text rendered in a data cell no record wrote to.
pub const DEFAULT_EMPTY_CELL: &str = "0.00";

pub const DEFAULT_TRANSFORM_FIELD: &str = "date";
pub const DEFAULT_VALUE_FIELD: &str = "cost";
pub const DEFAULT_TREND_COLUMN: &str = "trend";
pub const DEFAULT_TOTAL_COLUMN: &str = "total";

// ============================================================================
// POLICIES
// ============================================================================

/// How the total column and the footer are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TotalsMode {
    /// Row totals and footer values are sums (cost reports).
    #[default]
    Sum,
    /// Row totals average the non-zero data cells; footer values average
    /// every parseable cell in the column (uptime reports).
    Average,
}

/// What happens when two records write the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConflictPolicy {
    /// The later record in input order overwrites the earlier one.
    #[default]
    LastWriteWins,
    /// The second write fails the calculation with `PivotError::CellConflict`.
    Strict,
}

/// Which rows the prune stage removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyRowPolicy {
    /// Remove rows no record wrote to.
    #[default]
    Unpopulated,
    /// Remove rows whose rendered data cells all equal the empty-cell text,
    /// including cells a record explicitly set to that text.
    SentinelMatch,
}

/// Display order for body rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RowOrder {
    /// Canonical key order.
    #[default]
    Key,
    /// Highest value in the last data column first.
    LastColumnDescending,
    /// Ascending by the value of one identifier field.
    Identifier(String),
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

/// The complete, serializable definition of a report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Fields that group records into rows (ordered as displayed).
    pub identifier_fields: Vec<String>,

    /// Field whose values select the data column (usually a period).
    #[serde(default = "default_transform_field")]
    pub transform_field: String,

    /// Field holding the decimal string written into cells.
    #[serde(default = "default_value_field")]
    pub value_field: String,

    /// Declared domain of data column labels, in display order.
    #[serde(default)]
    pub data_headers: Vec<String>,

    /// Text rendered for unpopulated data cells.
    #[serde(default = "default_empty_cell")]
    pub empty_cell: String,

    /// Name of the trend column, if shown.
    #[serde(default = "default_trend_column")]
    pub trend_column: Option<String>,

    /// Name of the row total column, if shown.
    #[serde(default = "default_total_column")]
    pub total_column: Option<String>,

    #[serde(default)]
    pub totals: TotalsMode,

    #[serde(default)]
    pub conflicts: ConflictPolicy,

    #[serde(default)]
    pub empty_rows: EmptyRowPolicy,

    #[serde(default)]
    pub row_order: RowOrder,

    /// Named filters applied to records while populating and to rows while pruning.
    #[serde(default)]
    pub filters: FilterSet,
}

fn default_transform_field() -> String {
    DEFAULT_TRANSFORM_FIELD.to_string()
}

fn default_value_field() -> String {
    DEFAULT_VALUE_FIELD.to_string()
}

fn default_empty_cell() -> String {
    DEFAULT_EMPTY_CELL.to_string()
}

fn default_trend_column() -> Option<String> {
    Some(DEFAULT_TREND_COLUMN.to_string())
}

fn default_total_column() -> Option<String> {
    Some(DEFAULT_TOTAL_COLUMN.to_string())
}

impl Default for PivotDefinition {
    fn default() -> Self {
        PivotDefinition {
            identifier_fields: Vec::new(),
            transform_field: default_transform_field(),
            value_field: default_value_field(),
            data_headers: Vec::new(),
            empty_cell: default_empty_cell(),
            trend_column: default_trend_column(),
            total_column: default_total_column(),
            totals: TotalsMode::default(),
            conflicts: ConflictPolicy::default(),
            empty_rows: EmptyRowPolicy::default(),
            row_order: RowOrder::default(),
            filters: FilterSet::default(),
        }
    }
}

impl PivotDefinition {
    /// Creates a definition grouping on `identifier_fields` with one data
    /// column per entry of `data_headers`, using the cost-report defaults.
    pub fn new<I, D>(identifier_fields: I, data_headers: D) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        PivotDefinition {
            identifier_fields: identifier_fields.into_iter().map(Into::into).collect(),
            data_headers: data_headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Computed column names appended after the data columns, in display order.
    pub fn extra_headers(&self) -> Vec<String> {
        self.trend_column
            .iter()
            .chain(self.total_column.iter())
            .cloned()
            .collect()
    }

    /// Checks that the column names a table will use cannot collide.
    pub fn validate(&self) -> Result<()> {
        if self.transform_field.is_empty() {
            return Err(PivotError::InvalidDefinition(
                "transform field name is empty".to_string(),
            ));
        }
        if self.value_field.is_empty() {
            return Err(PivotError::InvalidDefinition(
                "value field name is empty".to_string(),
            ));
        }

        for field in &self.identifier_fields {
            if field.is_empty() {
                return Err(PivotError::InvalidDefinition(
                    "identifier field name is empty".to_string(),
                ));
            }
            if *field == self.transform_field || *field == self.value_field {
                return Err(PivotError::InvalidDefinition(format!(
                    "identifier field '{}' is also the transform or value field",
                    field
                )));
            }
            if self.data_headers.contains(field) {
                return Err(PivotError::InvalidDefinition(format!(
                    "data header '{}' shadows an identifier field",
                    field
                )));
            }
        }

        let extras = self.extra_headers();
        if extras.len() == 2 && extras[0] == extras[1] {
            return Err(PivotError::InvalidDefinition(format!(
                "trend and total columns share the name '{}'",
                extras[0]
            )));
        }
        for extra in &extras {
            if self.data_headers.contains(extra) || self.identifier_fields.contains(extra) {
                return Err(PivotError::InvalidDefinition(format!(
                    "computed column '{}' collides with a data header or identifier field",
                    extra
                )));
            }
        }

        if let RowOrder::Identifier(field) = &self.row_order {
            if !self.identifier_fields.contains(field) {
                return Err(PivotError::InvalidDefinition(format!(
                    "row order field '{}' is not an identifier field",
                    field
                )));
            }
        }

        Ok(())
    }
}
