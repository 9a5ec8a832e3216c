//! FILENAME: pivot-engine/src/key.rs
//! Canonical row keys.
//!
//! Every body row is indexed by the identifier values it groups on. The key
//! is built from the identifier field names sorted lexicographically (with
//! duplicates removed), each emitted as `field:value^`:
//!
//! ```text
//! environment:preproduction^region:eu-west-1^
//! ```
//!
//! A record without a value for an identifier field is encoded with `-` so
//! the key always parses. The reserved characters `:`, `^` and `\` are
//! backslash-escaped inside field names and values; keys built from ordinary
//! values are unaffected by the escaping.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::{PivotError, Result};
use crate::Record;

/// Separates a field name from its value.
pub const FIELD_SEPARATOR: char = ':';

/// Terminates every `field:value` pair.
pub const PAIR_TERMINATOR: char = '^';

/// Stand-in for an identifier value the record does not carry.
pub const MISSING_VALUE: &str = "-";

const ESCAPE: char = '\\';

/// (field, value) pairs in canonical field order.
/// Most report tables group on one to three identifiers.
pub type KeyPairs = SmallVec<[(String, String); 4]>;

/// A row key: ordered (field, value) pairs plus their derived string form.
///
/// Equality, ordering and hashing use the encoded string only, so a
/// `BTreeMap<CanonicalKey, _>` can be queried with a plain `&str`.
#[derive(Debug, Clone, Default)]
pub struct CanonicalKey {
    encoded: String,
    pairs: KeyPairs,
}

impl CanonicalKey {
    /// Builds the key for `record` over `identifier_fields`.
    /// Field order and duplicates in `identifier_fields` do not matter.
    pub fn encode<S: AsRef<str>>(record: &Record, identifier_fields: &[S]) -> Self {
        let pairs: KeyPairs = canonical_fields(identifier_fields)
            .into_iter()
            .map(|field| {
                let value = record
                    .get(&field)
                    .cloned()
                    .unwrap_or_else(|| MISSING_VALUE.to_string());
                (field, value)
            })
            .collect();

        Self::from_sorted(pairs)
    }

    /// Builds a key from arbitrary (field, value) pairs.
    /// When a field is repeated, its first value is kept.
    pub fn from_pairs<I, F, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<String>,
    {
        let mut pairs: KeyPairs = pairs
            .into_iter()
            .map(|(field, value)| (field.into(), value.into()))
            .collect();

        // Stable sort: the first occurrence of a field survives dedup.
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs.dedup_by(|later, earlier| later.0 == earlier.0);

        Self::from_sorted(pairs)
    }

    /// Parses an encoded key back into its pairs.
    ///
    /// The input must be a sequence of `field:value^` pairs with fields in
    /// strictly ascending order, i.e. something `encode` could have produced.
    /// The empty string is the key with no identifier fields.
    pub fn decode(key: &str) -> Result<Self> {
        let malformed = |reason: &str| PivotError::MalformedKey {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let mut pairs = KeyPairs::new();
        let mut field = String::new();
        let mut value = String::new();
        let mut in_value = false;
        let mut chars = key.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => {
                    let escaped = chars
                        .next()
                        .ok_or_else(|| malformed("dangling escape character"))?;
                    if in_value {
                        value.push(escaped);
                    } else {
                        field.push(escaped);
                    }
                }
                FIELD_SEPARATOR if !in_value => {
                    if field.is_empty() {
                        return Err(malformed("empty field name"));
                    }
                    in_value = true;
                }
                FIELD_SEPARATOR => return Err(malformed("unescaped ':' inside a value")),
                PAIR_TERMINATOR if in_value => {
                    pairs.push((std::mem::take(&mut field), std::mem::take(&mut value)));
                    in_value = false;
                }
                PAIR_TERMINATOR => return Err(malformed("pair has no ':' separator")),
                other => {
                    if in_value {
                        value.push(other);
                    } else {
                        field.push(other);
                    }
                }
            }
        }

        if in_value || !field.is_empty() {
            return Err(malformed("missing '^' terminator"));
        }

        if !pairs.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(malformed("fields are not in canonical order"));
        }

        Ok(Self::from_sorted(pairs))
    }

    fn from_sorted(pairs: KeyPairs) -> Self {
        let mut encoded = String::new();
        for (field, value) in &pairs {
            push_escaped(&mut encoded, field);
            encoded.push(FIELD_SEPARATOR);
            push_escaped(&mut encoded, value);
            encoded.push(PAIR_TERMINATOR);
        }
        CanonicalKey { encoded, pairs }
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value for `field`, if the key groups on it.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.pairs
            .binary_search_by(|(f, _)| f.as_str().cmp(field))
            .ok()
            .map(|idx| self.pairs[idx].1.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(f, _)| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs as a field -> value map (the decoded form of the key).
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.pairs.iter().cloned().collect()
    }
}

/// Sorts and de-duplicates identifier field names into key order.
pub fn canonical_fields<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
    sorted.sort();
    sorted.dedup();
    sorted
}

fn push_escaped(out: &mut String, raw: &str) {
    for c in raw.chars() {
        if matches!(c, FIELD_SEPARATOR | PAIR_TERMINATOR | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl PartialEq for CanonicalKey {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for CanonicalKey {}

impl Hash for CanonicalKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl PartialOrd for CanonicalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encoded.cmp(&other.encoded)
    }
}

impl Borrow<str> for CanonicalKey {
    fn borrow(&self) -> &str {
        &self.encoded
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl FromStr for CanonicalKey {
    type Err = PivotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl Serialize for CanonicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encoded)
    }
}

impl<'de> Deserialize<'de> for CanonicalKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CanonicalKey::decode(&raw).map_err(D::Error::custom)
    }
}
