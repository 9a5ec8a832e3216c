//! FILENAME: report/src/response.rs
//! API responses: grouped, flat records plus the request that produced them.

use std::collections::BTreeMap;

use pivot_engine::{calculate_table, parse_cell, PivotDefinition, PivotTable, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::TablePreset;
use crate::dates::{month_labels, parse_date};
use crate::error::Result;

/// A grouped API response.
///
/// ```json
/// {
///   "count": 2,
///   "request": {"start_date": "2025-04-01", "end_date": "2025-05-31"},
///   "dates": ["2025-04", "2025-05"],
///   "groups": ["environment", "region"],
///   "data": [{"environment": "production", "region": "eu-west-1",
///             "date": "2025-04", "cost": "23966.58"}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub count: usize,

    /// Request parameters echoed back by the API.
    #[serde(default)]
    pub request: BTreeMap<String, Value>,

    /// Data column labels. May be omitted when `request` carries
    /// `start_date` and `end_date`.
    #[serde(default)]
    pub dates: Vec<String>,

    /// Fields the records are grouped by.
    #[serde(default)]
    pub groups: Vec<String>,

    #[serde(default)]
    pub data: Vec<Record>,
}

impl ApiResponse {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn request_str(&self, name: &str) -> Option<&str> {
        self.request.get(name).and_then(Value::as_str)
    }

    /// The data column labels: `dates` when present, otherwise every month
    /// between the request's start and end dates.
    pub fn transform_domain(&self) -> Result<Vec<String>> {
        if !self.dates.is_empty() {
            return Ok(self.dates.clone());
        }

        match (self.request_str("start_date"), self.request_str("end_date")) {
            (Some(start), Some(end)) => Ok(month_labels(parse_date(start)?, parse_date(end)?)),
            _ => Ok(Vec::new()),
        }
    }

    pub fn definition(&self, preset: &TablePreset) -> Result<PivotDefinition> {
        Ok(preset.definition(&self.groups, self.transform_domain()?))
    }

    pub fn to_table(&self, preset: &TablePreset) -> Result<PivotTable> {
        let definition = self.definition(preset)?;
        Ok(calculate_table(&self.data, &definition)?)
    }
}

/// Data cells holding text that is neither `empty_cell` nor a number.
/// Totals and the footer count these as zero.
pub fn unparseable_cells(table: &PivotTable, empty_cell: &str) -> usize {
    table
        .body
        .values()
        .flat_map(|row| table.data_headers.iter().filter_map(move |label| row.get(label)))
        .filter(|text| text.as_str() != empty_cell && parse_cell(text).is_none())
        .count()
}
