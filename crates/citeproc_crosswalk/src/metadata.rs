/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The boundary to the repository's item metadata.
//!
//! Items expose repeatable metadata fields named `schema.element[.qualifier]`.
//! The engine only ever reads them through [`MetadataSource`]; the in-memory
//! [`MetadataRecord`] is the implementation used by the CLI and the tests.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The qualifier part of a [`FieldId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    Named(String),
    /// `*`: matches any qualifier, including none.
    Any,
}

/// A `schema.element[.qualifier]` metadata field identifier.
///
/// An id without a qualifier only matches unqualified values. Matching is
/// case-insensitive, as it is in repository field registries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldId {
    schema: String,
    element: String,
    qualifier: Option<Qualifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIdError {
    #[error("field id {0:?} must have the form schema.element[.qualifier]")]
    Shape(String),
    #[error("field id {id:?} contains invalid character {ch:?}")]
    InvalidCharacter { id: String, ch: char },
}

impl FieldId {
    pub fn new(schema: &str, element: &str, qualifier: Option<&str>) -> Self {
        Self {
            schema: schema.to_string(),
            element: element.to_string(),
            qualifier: qualifier.map(|q| {
                if q == "*" {
                    Qualifier::Any
                } else {
                    Qualifier::Named(q.to_string())
                }
            }),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    /// Whether a value stored under `stored` answers a query for `self`.
    pub fn matches(&self, stored: &FieldId) -> bool {
        if !self.schema.eq_ignore_ascii_case(&stored.schema)
            || !self.element.eq_ignore_ascii_case(&stored.element)
        {
            return false;
        }
        match (&self.qualifier, &stored.qualifier) {
            (Some(Qualifier::Any), _) => true,
            (None, None) => true,
            (Some(Qualifier::Named(a)), Some(Qualifier::Named(b))) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

fn check_component(id: &str, component: &str, allow_wildcard: bool) -> Result<(), FieldIdError> {
    if component.is_empty() {
        return Err(FieldIdError::Shape(id.to_string()));
    }
    if allow_wildcard && component == "*" {
        return Ok(());
    }
    match component
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        Some(ch) => Err(FieldIdError::InvalidCharacter {
            id: id.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

impl FromStr for FieldId {
    type Err = FieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        let parts: Vec<&str> = id.split('.').collect();
        match parts.as_slice() {
            [schema, element] => {
                check_component(id, schema, false)?;
                check_component(id, element, false)?;
                Ok(FieldId::new(schema, element, None))
            }
            [schema, element, qualifier] => {
                check_component(id, schema, false)?;
                check_component(id, element, false)?;
                check_component(id, qualifier, true)?;
                Ok(FieldId::new(schema, element, Some(qualifier)))
            }
            _ => Err(FieldIdError::Shape(id.to_string())),
        }
    }
}

impl TryFrom<String> for FieldId {
    type Error = FieldIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.element)?;
        match &self.qualifier {
            Some(Qualifier::Named(q)) => write!(f, ".{}", q),
            Some(Qualifier::Any) => write!(f, ".*"),
            None => Ok(()),
        }
    }
}

/// Read access to one item's metadata.
pub trait MetadataSource {
    /// All values stored under fields matching `field`, in item order.
    fn values(&self, field: &FieldId) -> Vec<&str>;

    /// The first value of `field`, when it is not blank.
    ///
    /// Only the first value is authoritative: a blank first value hides any
    /// later ones.
    fn first_value(&self, field: &FieldId) -> Option<&str> {
        self.values(field)
            .first()
            .copied()
            .filter(|v| !is_blank(v))
    }

    /// Whether any value of `field` is not blank.
    fn has_value(&self, field: &FieldId) -> bool {
        self.values(field).iter().any(|v| !is_blank(v))
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A single metadata value and the field it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataValue {
    pub field: FieldId,
    pub value: String,
}

/// An item's metadata held in memory, in item order.
///
/// Deserializes from an object keyed by field id whose values are a string
/// or an array of strings (`null` entries are dropped):
///
/// ```rust
/// use citeproc_crosswalk::{MetadataRecord, MetadataSource};
///
/// let record: MetadataRecord = serde_json::from_str(r#"{
///     "dc.title": "Radio and Astonishment",
///     "dc.contributor.author": ["Razlogova, Elena", null]
/// }"#).unwrap();
/// let authors = record.values(&"dc.contributor.author".parse().unwrap());
/// assert_eq!(authors, vec!["Razlogova, Elena"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RecordRepr")]
pub struct MetadataRecord {
    entries: Vec<MetadataValue>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(field id, value)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, FieldIdError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::new();
        for (field, value) in pairs {
            record.push(field.parse()?, value);
        }
        Ok(record)
    }

    pub fn push(&mut self, field: FieldId, value: impl Into<String>) {
        self.entries.push(MetadataValue {
            field,
            value: value.into(),
        });
    }

    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.push(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataValue> {
        self.entries.iter()
    }
}

impl MetadataSource for MetadataRecord {
    fn values(&self, field: &FieldId) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| field.matches(&entry.field))
            .map(|entry| entry.value.as_str())
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RecordRepr(IndexMap<String, OneOrMany>);

impl TryFrom<RecordRepr> for MetadataRecord {
    type Error = FieldIdError;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        let mut record = MetadataRecord::new();
        for (key, values) in repr.0 {
            let field: FieldId = key.parse()?;
            match values {
                OneOrMany::One(value) => record.push(field, value),
                OneOrMany::Many(values) => {
                    for value in values.into_iter().flatten() {
                        record.push(field.clone(), value);
                    }
                }
            }
        }
        Ok(record)
    }
}
