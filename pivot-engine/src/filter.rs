//! FILENAME: pivot-engine/src/filter.rs
//! Record and row filters.
//!
//! Filters are plain data: a named condition on one field. A `FilterSet` is
//! handed to the populate and prune stages, which stay pure functions of
//! their inputs.

use serde::{Deserialize, Serialize};

use crate::key::CanonicalKey;
use crate::Record;

/// A condition tested against a single field value.
/// `None` means the record (or row) does not carry the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterCondition {
    /// Value equals the text exactly.
    Equals(String),
    /// Value is absent or differs from the text.
    NotEquals(String),
    /// Value is one of the listed texts.
    OneOf(Vec<String>),
    /// Value is absent or none of the listed texts.
    NoneOf(Vec<String>),
    /// The field is present (any value, including empty).
    Present,
    BeginsWith(String),
    Contains(String),
}

impl FilterCondition {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (FilterCondition::Equals(expected), Some(v)) => v == expected,
            (FilterCondition::NotEquals(rejected), Some(v)) => v != rejected,
            (FilterCondition::OneOf(allowed), Some(v)) => allowed.iter().any(|a| a == v),
            (FilterCondition::NoneOf(rejected), Some(v)) => !rejected.iter().any(|r| r == v),
            (FilterCondition::Present, Some(_)) => true,
            (FilterCondition::BeginsWith(prefix), Some(v)) => v.starts_with(prefix.as_str()),
            (FilterCondition::Contains(needle), Some(v)) => v.contains(needle.as_str()),

            (FilterCondition::NotEquals(_), None) | (FilterCondition::NoneOf(_), None) => true,
            (_, None) => false,
        }
    }
}

/// A named condition on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// Label used in logs (e.g. "exclude-legacy-teams").
    pub name: String,

    /// The field the condition reads.
    pub field: String,

    pub condition: FilterCondition,
}

impl FieldFilter {
    pub fn new(name: impl Into<String>, field: impl Into<String>, condition: FilterCondition) -> Self {
        FieldFilter {
            name: name.into(),
            field: field.into(),
            condition,
        }
    }

    pub fn matches_record(&self, record: &Record) -> bool {
        self.condition
            .matches(record.get(&self.field).map(String::as_str))
    }
}

/// All filters that must pass for a record or row to be kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<FieldFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: FieldFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: FieldFilter) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldFilter> {
        self.filters.iter()
    }

    /// The first filter that rejects `record`, if any.
    pub fn rejection(&self, record: &Record) -> Option<&FieldFilter> {
        self.filters.iter().find(|f| !f.matches_record(record))
    }

    pub fn matches_record(&self, record: &Record) -> bool {
        self.rejection(record).is_none()
    }

    /// Tests a row by its identifier values.
    ///
    /// Only filters on fields the key groups on take part; a row cannot be
    /// judged on data it does not carry.
    pub fn matches_key(&self, key: &CanonicalKey) -> bool {
        self.filters.iter().all(|f| match key.get(&f.field) {
            Some(value) => f.condition.matches(Some(value)),
            None => true,
        })
    }
}

impl FromIterator<FieldFilter> for FilterSet {
    fn from_iter<T: IntoIterator<Item = FieldFilter>>(iter: T) -> Self {
        FilterSet {
            filters: iter.into_iter().collect(),
        }
    }
}
