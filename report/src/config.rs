//! FILENAME: report/src/config.rs
//! Report configuration: named table presets.
//!
//! A preset maps an API response onto a `PivotDefinition`. The identifier
//! fields and data columns normally come from the response itself (its
//! `groups` and `dates`); the preset supplies everything else.
//!
//! Two presets are built in and are always available unless a config file
//! overrides them by name:
//! - `costs`: summed totals, largest last-month value first
//! - `uptime`: averaged totals, ordered by team

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use pivot_engine::{
    ConflictPolicy, EmptyRowPolicy, FilterSet, PivotDefinition, RowOrder, TotalsMode,
    DEFAULT_EMPTY_CELL, DEFAULT_TOTAL_COLUMN, DEFAULT_TRANSFORM_FIELD, DEFAULT_TREND_COLUMN,
    DEFAULT_VALUE_FIELD,
};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

pub const COSTS_PRESET: &str = "costs";
pub const UPTIME_PRESET: &str = "uptime";

// ============================================================================
// TABLE PRESET
// ============================================================================

/// How to turn one API response into a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreset {
    /// Grouping fields. Empty means "use the response's `groups`".
    #[serde(default)]
    pub identifier_fields: Vec<String>,

    #[serde(default = "default_transform_field")]
    pub transform_field: String,

    #[serde(default = "default_value_field")]
    pub value_field: String,

    /// Sort the data column labels ascending before use.
    #[serde(default = "default_true")]
    pub sort_data_headers: bool,

    #[serde(default = "default_empty_cell")]
    pub empty_cell: String,

    #[serde(default = "default_trend_column")]
    pub trend_column: Option<String>,

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

    #[serde(default)]
    pub filters: FilterSet,
}

fn default_transform_field() -> String {
    DEFAULT_TRANSFORM_FIELD.to_string()
}

fn default_value_field() -> String {
    DEFAULT_VALUE_FIELD.to_string()
}

fn default_true() -> bool {
    true
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

impl Default for TablePreset {
    fn default() -> Self {
        TablePreset {
            identifier_fields: Vec::new(),
            transform_field: default_transform_field(),
            value_field: default_value_field(),
            sort_data_headers: true,
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

impl TablePreset {
    /// Monthly cost tables.
    pub fn costs() -> Self {
        TablePreset {
            value_field: "cost".to_string(),
            totals: TotalsMode::Sum,
            row_order: RowOrder::LastColumnDescending,
            ..Self::default()
        }
    }

    /// Monthly uptime tables, one row per team.
    pub fn uptime() -> Self {
        TablePreset {
            value_field: "average".to_string(),
            totals: TotalsMode::Average,
            row_order: RowOrder::Identifier("team".to_string()),
            ..Self::default()
        }
    }

    /// Builds the definition for a response grouped by `groups` whose data
    /// columns are `data_headers`.
    pub fn definition(&self, groups: &[String], mut data_headers: Vec<String>) -> PivotDefinition {
        if self.sort_data_headers {
            data_headers.sort();
        }

        let identifier_fields = if self.identifier_fields.is_empty() {
            groups.to_vec()
        } else {
            self.identifier_fields.clone()
        };

        PivotDefinition {
            identifier_fields,
            transform_field: self.transform_field.clone(),
            value_field: self.value_field.clone(),
            data_headers,
            empty_cell: self.empty_cell.clone(),
            trend_column: self.trend_column.clone(),
            total_column: self.total_column.clone(),
            totals: self.totals,
            conflicts: self.conflicts,
            empty_rows: self.empty_rows,
            row_order: self.row_order.clone(),
            filters: self.filters.clone(),
        }
    }
}

// ============================================================================
// REPORT CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Presets by name.
    #[serde(default)]
    pub presets: BTreeMap<String, TablePreset>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let mut config = ReportConfig {
            presets: BTreeMap::new(),
        };
        config.add_builtin_presets();
        config
    }
}

impl ReportConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let mut config: ReportConfig = serde_json::from_str(text)?;
        config.add_builtin_presets();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Presets defined in the file take precedence over the built-ins.
    fn add_builtin_presets(&mut self) {
        self.presets
            .entry(COSTS_PRESET.to_string())
            .or_insert_with(TablePreset::costs);
        self.presets
            .entry(UPTIME_PRESET.to_string())
            .or_insert_with(TablePreset::uptime);
    }

    pub fn preset(&self, name: &str) -> Result<&TablePreset> {
        self.presets
            .get(name)
            .ok_or_else(|| ReportError::UnknownPreset(name.to_string()))
    }
}
