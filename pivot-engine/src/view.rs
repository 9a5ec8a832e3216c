//! FILENAME: pivot-engine/src/view.rs
//! Pivot Table - Renderable output for report pages.
//!
//! A `PivotTable` is assembled once per calculation and never mutated
//! afterwards. It serializes to the JSON shape report templates consume:
//! - `row_headers`: identifier columns on the left
//! - `data_headers`: one column per transform label (e.g. month)
//! - `extra_headers`: computed columns (trend, total)
//! - `body`: canonical key -> row (column label -> text)
//! - `footer`: column label -> aggregate text

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::definition::RowOrder;
use crate::key::CanonicalKey;
use crate::totals::parse_cell;

/// One rendered row: column label -> cell text.
pub type TableRow = BTreeMap<String, String>;

/// Per-column aggregates shown below the body.
pub type Footer = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub row_headers: Vec<String>,
    pub data_headers: Vec<String>,
    pub extra_headers: Vec<String>,
    pub body: BTreeMap<CanonicalKey, TableRow>,
    pub footer: Footer,

    /// Display order used by `sorted_rows`. Not part of the wire shape.
    #[serde(skip)]
    pub row_order: RowOrder,
}

impl PivotTable {
    /// Every column label in display order: row, data, then extra headers.
    pub fn header(&self) -> Vec<&str> {
        self.row_headers
            .iter()
            .chain(self.data_headers.iter())
            .chain(self.extra_headers.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Looks up a row by its encoded key, e.g. `"team:sirius^"`.
    pub fn row(&self, key: &str) -> Option<&TableRow> {
        self.body.get(key)
    }

    /// Cell text at (`key`, `column`).
    pub fn cell(&self, key: &str, column: &str) -> Option<&str> {
        self.row(key)
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }

    /// Body rows in the table's display order.
    pub fn sorted_rows(&self) -> Vec<(&CanonicalKey, &TableRow)> {
        self.sorted_rows_by(&self.row_order)
    }

    /// Body rows in the given order. Sorting is stable, so ties keep key order.
    pub fn sorted_rows_by(&self, order: &RowOrder) -> Vec<(&CanonicalKey, &TableRow)> {
        let mut rows: Vec<(&CanonicalKey, &TableRow)> = self.body.iter().collect();

        match order {
            RowOrder::Key => {}
            RowOrder::LastColumnDescending => {
                if let Some(last) = self.data_headers.last() {
                    // NaN counts as zero, like any other cell that is not a number.
                    let value = |row: &TableRow| {
                        row.get(last)
                            .and_then(|text| parse_cell(text))
                            .filter(|v| !v.is_nan())
                            .unwrap_or(0.0)
                    };
                    rows.sort_by(|a, b| value(b.1).total_cmp(&value(a.1)));
                }
            }
            RowOrder::Identifier(field) => {
                rows.sort_by(|a, b| a.1.get(field).cmp(&b.1.get(field)));
            }
        }

        rows
    }
}
