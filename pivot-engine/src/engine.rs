//! FILENAME: pivot-engine/src/engine.rs
//! Pivot Engine - The calculation core that turns flat records into a table.
//!
//! This module takes a PivotDefinition (configuration) and a slice of
//! records (data) and produces a PivotTable (rows ready for rendering).
//!
//! Algorithm:
//! 1. Collect the unique values of each identifier field
//! 2. Generate every combination of those values as a row key
//! 3. Build a skeleton: one row per key, every data cell unpopulated
//! 4. Populate cells from the records
//! 5. Prune rows that received no data
//! 6. Render rows, add trend/total columns, and compute the footer
//!
//! Every stage is a pure function: it reads its inputs and returns a new
//! value. Stages 3-5 are public so callers can run a partial pipeline.

use std::collections::BTreeMap;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::cache::DimensionValueSets;
use crate::definition::{ConflictPolicy, EmptyRowPolicy, PivotDefinition};
use crate::error::{PivotError, Result};
use crate::filter::FilterSet;
use crate::key::{canonical_fields, CanonicalKey};
use crate::totals::{column_totals, row_total, trend_value};
use crate::view::{PivotTable, TableRow};
use crate::Record;

/// Log target for engine diagnostics.
pub const LOG_TARGET: &str = "PIVOT";

// ============================================================================
// WORKING STRUCTURES
// ============================================================================

/// A data cell while the table is being built.
///
/// Whether a record wrote the cell is tracked here, separately from the
/// text shown for cells nobody wrote to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Unpopulated,
    Populated(String),
}

impl Cell {
    pub fn is_populated(&self) -> bool {
        matches!(self, Cell::Populated(_))
    }

    /// The text to render, using `empty_cell` for unpopulated cells.
    pub fn text<'a>(&'a self, empty_cell: &'a str) -> &'a str {
        match self {
            Cell::Unpopulated => empty_cell,
            Cell::Populated(text) => text,
        }
    }
}

/// The data columns of a table: the declared transform labels in display
/// order, de-duplicated, with O(1) label lookup.
#[derive(Debug, Clone, Default)]
pub struct DataColumns {
    labels: Vec<String>,
    positions: FxHashMap<String, usize>,
}

impl DataColumns {
    /// Keeps the first occurrence of a repeated label.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut columns = DataColumns::default();
        for label in labels {
            let label = label.as_ref();
            if !columns.positions.contains_key(label) {
                columns.positions.insert(label.to_string(), columns.labels.len());
                columns.labels.push(label.to_string());
            }
        }
        columns
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A working row: one cell per data column, aligned with `DataColumns`.
/// Identifier values live in the row's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotRow {
    cells: Vec<Cell>,
}

impl PivotRow {
    pub fn unpopulated(width: usize) -> Self {
        PivotRow {
            cells: vec![Cell::Unpopulated; width],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, position: usize) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Whether any record wrote to this row.
    pub fn has_data(&self) -> bool {
        self.cells.iter().any(Cell::is_populated)
    }

    /// Whether every cell renders as `empty_cell`.
    pub fn renders_empty(&self, empty_cell: &str) -> bool {
        self.cells.iter().all(|c| c.text(empty_cell) == empty_cell)
    }
}

/// Working table body, keyed and ordered by canonical key.
pub type PivotBody = BTreeMap<CanonicalKey, PivotRow>;

/// What the populate stage did with each record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateStats {
    /// Cells written (including overwrites).
    pub written: usize,
    /// Writes that replaced an earlier record's value.
    pub overwritten: usize,
    /// Records rejected by a filter.
    pub filtered: usize,
    /// Records whose key has no skeleton row.
    pub unmatched_key: usize,
    /// Records whose transform label is not a data column.
    pub out_of_domain: usize,
    /// Records missing the transform or value field.
    pub incomplete: usize,
}

impl PopulateStats {
    pub fn dropped(&self) -> usize {
        self.filtered + self.unmatched_key + self.out_of_domain + self.incomplete
    }
}

// ============================================================================
// PIPELINE STAGES
// ============================================================================

/// Cartesian product of the value sets as row keys.
///
/// Produces exactly `combination_count()` keys. The first field varies
/// slowest. No fields, or any empty value set, gives no keys.
pub fn generate_combinations(dimensions: &DimensionValueSets) -> Vec<CanonicalKey> {
    if dimensions.is_empty() {
        return Vec::new();
    }

    let fields = dimensions.fields();
    let mut keys = Vec::with_capacity(dimensions.combination_count());
    let mut positions = vec![0usize; fields.len()];

    loop {
        keys.push(CanonicalKey::from_pairs(
            fields
                .iter()
                .zip(&positions)
                .map(|(f, &p)| (f.field.clone(), f.values[p].clone())),
        ));

        // Advance like an odometer, last field fastest.
        let mut level = fields.len();
        loop {
            if level == 0 {
                return keys;
            }
            level -= 1;
            positions[level] += 1;
            if positions[level] < fields[level].values.len() {
                break;
            }
            positions[level] = 0;
        }
    }
}

/// One unpopulated row per key, with a cell for every data column.
pub fn build_skeleton(keys: &[CanonicalKey], columns: &DataColumns) -> PivotBody {
    keys.iter()
        .map(|key| (key.clone(), PivotRow::unpopulated(columns.len())))
        .collect()
}

/// Writes each record's value into the cell at (record key, transform label).
///
/// Records are dropped, not reported as errors, when a filter rejects them,
/// when they lack the transform or value field, when their key has no row,
/// or when their transform label is not a data column. Under
/// `ConflictPolicy::Strict` a second write to the same cell fails with
/// `PivotError::CellConflict`; otherwise the later record wins.
pub fn populate(
    records: &[Record],
    skeleton: PivotBody,
    columns: &DataColumns,
    definition: &PivotDefinition,
) -> Result<(PivotBody, PopulateStats)> {
    let identifiers = canonical_fields(&definition.identifier_fields);
    let mut body = skeleton;
    let mut stats = PopulateStats::default();

    for record in records {
        if definition.filters.rejection(record).is_some() {
            stats.filtered += 1;
            continue;
        }

        let (label, value) = match (
            record.get(&definition.transform_field),
            record.get(&definition.value_field),
        ) {
            (Some(label), Some(value)) => (label, value),
            _ => {
                stats.incomplete += 1;
                continue;
            }
        };

        let key = CanonicalKey::encode(record, &identifiers);
        let row = match body.get_mut(&key) {
            Some(row) => row,
            None => {
                stats.unmatched_key += 1;
                continue;
            }
        };

        let position = match columns.position(label) {
            Some(position) => position,
            None => {
                stats.out_of_domain += 1;
                continue;
            }
        };

        let cell = &mut row.cells[position];
        if cell.is_populated() {
            if definition.conflicts == ConflictPolicy::Strict {
                return Err(PivotError::CellConflict {
                    key: key.to_string(),
                    column: label.clone(),
                });
            }
            stats.overwritten += 1;
        }
        *cell = Cell::Populated(value.clone());
        stats.written += 1;
    }

    if stats.overwritten > 0 {
        warn!(
            target: LOG_TARGET,
            "{} cell(s) written more than once, later records kept",
            stats.overwritten
        );
    }

    Ok((body, stats))
}

/// Removes rows that carry no data, then rows whose identifier values a
/// filter rejects.
pub fn prune(
    body: PivotBody,
    policy: EmptyRowPolicy,
    empty_cell: &str,
    filters: &FilterSet,
) -> PivotBody {
    body.into_iter()
        .filter(|(key, row)| {
            let has_data = match policy {
                EmptyRowPolicy::Unpopulated => row.has_data(),
                EmptyRowPolicy::SentinelMatch => !row.renders_empty(empty_cell),
            };
            has_data && filters.matches_key(key)
        })
        .collect()
}

/// Renders a working row: identifier cells from the key, then data cells.
pub fn render_row(
    key: &CanonicalKey,
    row: &PivotRow,
    columns: &DataColumns,
    empty_cell: &str,
) -> TableRow {
    let mut rendered: TableRow = key.to_map();
    for (label, cell) in columns.labels().iter().zip(row.cells()) {
        rendered.insert(label.clone(), cell.text(empty_cell).to_string());
    }
    rendered
}

// ============================================================================
// PIVOT CALCULATOR
// ============================================================================

/// Runs the full pipeline for one definition over one record set.
pub struct PivotCalculator<'a> {
    definition: &'a PivotDefinition,
    records: &'a [Record],

    /// Identifier fields in canonical (sorted, de-duplicated) order.
    identifier_fields: Vec<String>,

    /// Data columns built from the declared transform domain.
    columns: DataColumns,
}

impl<'a> PivotCalculator<'a> {
    pub fn new(definition: &'a PivotDefinition, records: &'a [Record]) -> Self {
        PivotCalculator {
            definition,
            records,
            identifier_fields: canonical_fields(&definition.identifier_fields),
            columns: DataColumns::new(&definition.data_headers),
        }
    }

    /// Executes the full calculation and returns the assembled table.
    pub fn calculate(&self) -> Result<PivotTable> {
        self.definition.validate()?;

        // Step 1: unique values per identifier field
        let dimensions = DimensionValueSets::collect(self.records, &self.identifier_fields);
        for field in dimensions.fields() {
            debug!(
                target: LOG_TARGET,
                "field={} unique_values={}",
                field.field,
                field.unique_count()
            );
        }

        // Step 2: every combination becomes a candidate row
        let keys = generate_combinations(&dimensions);
        debug!(target: LOG_TARGET, "combinations={}", keys.len());

        // Step 3: skeleton rows with unpopulated cells
        let skeleton = build_skeleton(&keys, &self.columns);

        // Step 4: write record values into cells
        let (body, stats) = populate(self.records, skeleton, &self.columns, self.definition)?;
        debug!(
            target: LOG_TARGET,
            "populate records={} written={} overwritten={} filtered={} unmatched_key={} out_of_domain={} incomplete={}",
            self.records.len(),
            stats.written,
            stats.overwritten,
            stats.filtered,
            stats.unmatched_key,
            stats.out_of_domain,
            stats.incomplete
        );

        // Step 5: drop rows without data
        let candidates = body.len();
        let body = prune(
            body,
            self.definition.empty_rows,
            &self.definition.empty_cell,
            &self.definition.filters,
        );
        debug!(
            target: LOG_TARGET,
            "prune kept={} removed={}",
            body.len(),
            candidates - body.len()
        );

        // Step 6: render, totals, footer
        Ok(self.assemble(&body))
    }

    fn assemble(&self, body: &PivotBody) -> PivotTable {
        let definition = self.definition;
        let data_labels = self.columns.labels();

        let mut rendered = BTreeMap::new();
        for (key, row) in body {
            let mut table_row = render_row(key, row, &self.columns, &definition.empty_cell);

            if let Some(trend) = &definition.trend_column {
                let value = trend_value(&table_row);
                table_row.insert(trend.clone(), value);
            }
            if let Some(total) = &definition.total_column {
                let value = row_total(&table_row, data_labels, definition.totals);
                table_row.insert(total.clone(), value);
            }

            rendered.insert(key.clone(), table_row);
        }

        let mut sum_columns = data_labels.to_vec();
        sum_columns.extend(definition.total_column.iter().cloned());

        let mut extra_columns = self.identifier_fields.clone();
        extra_columns.extend(definition.trend_column.iter().cloned());

        let footer = column_totals(
            rendered.values(),
            &sum_columns,
            &extra_columns,
            definition.totals,
        );

        PivotTable {
            row_headers: definition.identifier_fields.clone(),
            data_headers: data_labels.to_vec(),
            extra_headers: definition.extra_headers(),
            body: rendered,
            footer,
            row_order: definition.row_order.clone(),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates a report table from a definition and records.
/// This is the main entry point for the calculation engine.
pub fn calculate_table(records: &[Record], definition: &PivotDefinition) -> Result<PivotTable> {
    PivotCalculator::new(definition, records).calculate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{RowOrder, TotalsMode};
    use crate::filter::{FieldFilter, FilterCondition};

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn cost(environment: &str, region: &str, date: &str, cost: &str) -> Record {
        record(&[
            ("environment", environment),
            ("region", region),
            ("date", date),
            ("cost", cost),
        ])
    }

    fn create_test_records() -> Vec<Record> {
        vec![
            cost("preproduction", "eu-west-1", "2025-04", "18698.65"),
            cost("preproduction", "global", "2025-04", "112.84"),
        ]
    }

    fn create_test_definition() -> PivotDefinition {
        PivotDefinition::new(["environment", "region"], ["2025-04", "2025-05"])
    }

    fn skeleton_for(records: &[Record], def: &PivotDefinition) -> (PivotBody, DataColumns) {
        let columns = DataColumns::new(&def.data_headers);
        let dims = DimensionValueSets::collect(records, &def.identifier_fields);
        (build_skeleton(&generate_combinations(&dims), &columns), columns)
    }

    #[test]
    fn test_combination_count_matches_product() {
        let cases: Vec<Vec<(&str, Vec<&str>)>> = vec![
            vec![("n", vec!["1", "2", "3"]), ("a", vec!["A", "B"])],
            vec![("x", vec!["only"])],
            vec![("a", vec!["1", "2"]), ("b", vec!["1", "2"]), ("c", vec!["1", "2", "3", "4"])],
            vec![("a", vec!["1"]), ("b", vec![])],
        ];

        for case in cases {
            let expected: usize = case.iter().map(|(_, v)| v.len()).product();
            let dims = DimensionValueSets::from_fields(case.into_iter().map(|(f, vals)| {
                (f.to_string(), vals.into_iter().map(String::from).collect())
            }));
            let keys = generate_combinations(&dims);

            assert_eq!(keys.len(), expected);
            assert_eq!(keys.len(), dims.combination_count());
        }
    }

    #[test]
    fn test_combination_order_first_field_slowest() {
        let dims = DimensionValueSets::from_fields(vec![
            ("account".to_string(), vec!["A".to_string(), "B".to_string()]),
            ("region".to_string(), vec!["2024".to_string(), "2025".to_string()]),
        ]);

        let keys: Vec<String> = generate_combinations(&dims)
            .iter()
            .map(|k| k.to_string())
            .collect();

        assert_eq!(
            keys,
            vec![
                "account:A^region:2024^",
                "account:A^region:2025^",
                "account:B^region:2024^",
                "account:B^region:2025^",
            ]
        );
    }

    #[test]
    fn test_no_fields_no_combinations() {
        let dims = DimensionValueSets::collect::<&str>(&create_test_records(), &[]);
        assert!(generate_combinations(&dims).is_empty());
    }

    #[test]
    fn test_skeleton_rows_start_unpopulated() {
        let records = create_test_records();
        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&records, &def);

        // 1 environment x 2 regions
        assert_eq!(skeleton.len(), 2);
        for row in skeleton.values() {
            assert_eq!(row.cells().len(), columns.len());
            assert!(!row.has_data());
            assert!(row.renders_empty("0.00"));
        }
    }

    #[test]
    fn test_data_columns_dedupe() {
        let columns = DataColumns::new(&["2025-04", "2025-05", "2025-04"]);
        assert_eq!(columns.labels(), &["2025-04", "2025-05"]);
        assert_eq!(columns.position("2025-05"), Some(1));
        assert_eq!(columns.position("2025-06"), None);
    }

    #[test]
    fn test_populate_writes_cells() {
        let records = create_test_records();
        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&records, &def);

        let (body, stats) = populate(&records, skeleton, &columns, &def).unwrap();
        let row = &body["environment:preproduction^region:eu-west-1^"];

        assert_eq!(row.cell(0), Some(&Cell::Populated("18698.65".to_string())));
        assert_eq!(row.cell(1), Some(&Cell::Unpopulated));
        assert_eq!(stats.written, 2);
        assert_eq!(stats.dropped(), 0);
    }

    #[test]
    fn test_populate_last_write_wins() {
        let records = vec![
            cost("prod", "eu", "2025-04", "1"),
            cost("prod", "eu", "2025-04", "2"),
        ];
        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&records, &def);

        let (body, stats) = populate(&records, skeleton, &columns, &def).unwrap();
        assert_eq!(
            body["environment:prod^region:eu^"].cell(0),
            Some(&Cell::Populated("2".to_string()))
        );
        assert_eq!(stats.overwritten, 1);
    }

    #[test]
    fn test_populate_strict_reports_conflict() {
        let records = vec![
            cost("prod", "eu", "2025-04", "1"),
            cost("prod", "eu", "2025-04", "2"),
        ];
        let mut def = create_test_definition();
        def.conflicts = ConflictPolicy::Strict;
        let (skeleton, columns) = skeleton_for(&records, &def);

        let err = populate(&records, skeleton, &columns, &def).unwrap_err();
        assert_eq!(
            err,
            PivotError::CellConflict {
                key: "environment:prod^region:eu^".to_string(),
                column: "2025-04".to_string(),
            }
        );
    }

    #[test]
    fn test_populate_drops_records_silently() {
        let records = vec![
            cost("prod", "eu", "2025-04", "1"),
            // outside the declared window
            cost("prod", "eu", "2025-09", "5"),
            // no value field
            record(&[("environment", "prod"), ("region", "eu"), ("date", "2025-05")]),
        ];
        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&records, &def);

        // A record for a combination the skeleton was not built from.
        let mut extra = records.clone();
        extra.push(cost("dev", "us", "2025-04", "3"));

        let (body, stats) = populate(&extra, skeleton, &columns, &def).unwrap();
        assert_eq!(stats.written, 1);
        assert_eq!(stats.out_of_domain, 1);
        assert_eq!(stats.incomplete, 1);
        assert_eq!(stats.unmatched_key, 1);
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_populate_disjoint_batches_compose() {
        let first = vec![
            cost("prod", "eu", "2025-04", "1"),
            cost("dev", "us", "2025-05", "2"),
        ];
        let second = vec![
            cost("prod", "eu", "2025-05", "3"),
            cost("dev", "eu", "2025-04", "4"),
        ];
        let all: Vec<Record> = first.iter().chain(second.iter()).cloned().collect();

        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&all, &def);

        let (once, _) = populate(&all, skeleton.clone(), &columns, &def).unwrap();
        let (step, _) = populate(&first, skeleton, &columns, &def).unwrap();
        let (twice, _) = populate(&second, step, &columns, &def).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_prune_keeps_rows_with_any_data() {
        let records = vec![
            cost("a", "x", "2025-04", "1"),
            cost("b", "y", "2025-05", "2"),
        ];
        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&records, &def);
        assert_eq!(skeleton.len(), 4);

        let (body, _) = populate(&records, skeleton, &columns, &def).unwrap();
        let pruned = prune(body.clone(), EmptyRowPolicy::Unpopulated, "0.00", &FilterSet::new());

        for (key, row) in &body {
            assert_eq!(pruned.contains_key(key), row.has_data());
        }
        assert_eq!(pruned.len(), 2);
        assert!(!pruned.contains_key("environment:a^region:y^"));
        assert!(!pruned.contains_key("environment:b^region:x^"));
    }

    #[test]
    fn test_prune_policies_differ_on_explicit_sentinel() {
        let records = vec![cost("a", "x", "2025-04", "0.00")];
        let def = create_test_definition();
        let (skeleton, columns) = skeleton_for(&records, &def);
        let (body, _) = populate(&records, skeleton, &columns, &def).unwrap();

        let by_presence = prune(body.clone(), EmptyRowPolicy::Unpopulated, "0.00", &FilterSet::new());
        let by_text = prune(body, EmptyRowPolicy::SentinelMatch, "0.00", &FilterSet::new());

        assert_eq!(by_presence.len(), 1);
        assert!(by_text.is_empty());
    }

    #[test]
    fn test_filters_apply_to_records_and_rows() {
        let records = vec![
            cost("prod", "eu", "2025-04", "1"),
            cost("dev", "eu", "2025-04", "2"),
            cost("prod", "us", "2025-05", "3"),
        ];
        let mut def = create_test_definition();
        def.filters.push(FieldFilter::new(
            "prod-only",
            "environment",
            FilterCondition::Equals("prod".to_string()),
        ));

        let table = calculate_table(&records, &def).unwrap();
        let keys: Vec<&str> = table.body.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["environment:prod^region:eu^", "environment:prod^region:us^"]);
    }

    #[test]
    fn test_scenario_single_month_row() {
        let records = create_test_records();
        let def = create_test_definition();

        let table = calculate_table(&records, &def).unwrap();
        let key = "environment:preproduction^region:eu-west-1^";

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(key, "environment"), Some("preproduction"));
        assert_eq!(table.cell(key, "region"), Some("eu-west-1"));
        assert_eq!(table.cell(key, "2025-04"), Some("18698.65"));
        assert_eq!(table.cell(key, "2025-05"), Some("0.00"));
        assert_eq!(table.cell(key, "trend"), Some(""));
        assert_eq!(table.cell(key, "total"), Some("18698.65"));

        assert_eq!(table.row_headers, vec!["environment", "region"]);
        assert_eq!(table.data_headers, vec!["2025-04", "2025-05"]);
        assert_eq!(table.extra_headers, vec!["trend", "total"]);
    }

    #[test]
    fn test_footer_sums_columns() {
        let records = create_test_records();
        let table = calculate_table(&records, &create_test_definition()).unwrap();

        let expected = crate::totals::format_general(18698.65 + 112.84);
        assert_eq!(table.footer["2025-04"], expected);
        assert_eq!(table.footer["2025-05"], "0");
        assert_eq!(table.footer["total"], expected);
        assert_eq!(table.footer["environment"], "");
        assert_eq!(table.footer["region"], "");
        assert_eq!(table.footer["trend"], "");
    }

    #[test]
    fn test_average_totals() {
        let records = vec![
            record(&[("team", "a"), ("date", "2025-04"), ("average", "99.5")]),
            record(&[("team", "a"), ("date", "2025-05"), ("average", "100")]),
            record(&[("team", "b"), ("date", "2025-04"), ("average", "98")]),
        ];
        let mut def = PivotDefinition::new(["team"], ["2025-04", "2025-05"]);
        def.value_field = "average".to_string();
        def.totals = TotalsMode::Average;

        let table = calculate_table(&records, &def).unwrap();
        assert_eq!(table.cell("team:a^", "total"), Some("99.75"));
        assert_eq!(table.cell("team:b^", "total"), Some("98"));
        assert_eq!(table.footer["2025-04"], "98.75");
        // "0.00" in team b's May cell parses, so it is counted.
        assert_eq!(table.footer["2025-05"], "50");
    }

    #[test]
    fn test_empty_inputs_give_empty_table() {
        let def = create_test_definition();
        let table = calculate_table(&[], &def).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.footer["2025-04"], "0");

        let no_ids = PivotDefinition::new(Vec::<String>::new(), ["2025-04"]);
        let table = calculate_table(&create_test_records(), &no_ids).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_definition_is_rejected() {
        let def = PivotDefinition::new(["date"], ["2025-04"]);
        assert!(matches!(
            calculate_table(&create_test_records(), &def),
            Err(PivotError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_row_order_carried_to_table() {
        let mut def = create_test_definition();
        def.row_order = RowOrder::LastColumnDescending;
        let table = calculate_table(&create_test_records(), &def).unwrap();
        assert_eq!(table.row_order, RowOrder::LastColumnDescending);
    }
}
