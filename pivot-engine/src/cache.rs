//! FILENAME: pivot-engine/src/cache.rs
//! Dimension Cache - the unique values observed per identifier field.
//!
//! Built in a single pass over the records. Each identifier field keeps its
//! distinct values in ascending order; the Cartesian product of these sets
//! is the complete row space of the table.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::key::canonical_fields;
use crate::Record;

/// The distinct values of one identifier field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    /// The identifier field name.
    pub field: String,

    /// Distinct values in ascending order.
    pub values: Vec<String>,
}

impl FieldValues {
    pub fn unique_count(&self) -> usize {
        self.values.len()
    }
}

/// Unique values for every identifier field, in canonical field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValueSets {
    fields: Vec<FieldValues>,
}

impl DimensionValueSets {
    /// Collects the distinct values of each identifier field across `records`.
    ///
    /// Field names are sorted and de-duplicated first. Records that do not
    /// carry a field contribute nothing to that field's set.
    pub fn collect<S: AsRef<str>>(records: &[Record], identifier_fields: &[S]) -> Self {
        let fields = canonical_fields(identifier_fields)
            .into_iter()
            .map(|field| {
                let mut seen: FxHashSet<&str> = FxHashSet::default();
                for record in records {
                    if let Some(value) = record.get(&field) {
                        seen.insert(value.as_str());
                    }
                }

                let mut values: Vec<String> = seen.into_iter().map(str::to_string).collect();
                values.sort();

                FieldValues { field, values }
            })
            .collect();

        DimensionValueSets { fields }
    }

    /// Builds value sets directly, e.g. from a declared domain.
    /// Fields are put into canonical order; values are sorted and de-duplicated.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut fields: Vec<FieldValues> = fields
            .into_iter()
            .map(|(field, mut values)| {
                values.sort();
                values.dedup();
                FieldValues { field, values }
            })
            .collect();

        fields.sort_by(|a, b| a.field.cmp(&b.field));
        fields.dedup_by(|later, earlier| later.field == earlier.field);

        DimensionValueSets { fields }
    }

    pub fn fields(&self) -> &[FieldValues] {
        &self.fields
    }

    /// Distinct values of `field`, if it is one of the identifier fields.
    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.values.as_slice())
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Size of the Cartesian product of all value sets.
    ///
    /// Zero when there are no identifier fields or any field has no values:
    /// there are no rows to build in either case.
    pub fn combination_count(&self) -> usize {
        if self.fields.is_empty() {
            return 0;
        }
        self.fields
            .iter()
            .map(FieldValues::unique_count)
            .product()
    }

    pub fn is_empty(&self) -> bool {
        self.combination_count() == 0
    }
}
