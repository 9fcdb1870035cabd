/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The CSL-JSON item handed to a citation processor.

use std::io::Write;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Item id the downstream processor expects for a single-item render.
pub const ITEM_ID: &str = "ITEM-1";

/// Media type of the serialized document.
pub const MIME_TYPE: &str = "application/json";

/// A CSL name variable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
}

impl Name {
    pub fn new(family: &str, given: &str) -> Self {
        Self {
            family: family.to_string(),
            given: Some(given.to_string()),
        }
    }

    pub fn family_only(family: &str) -> Self {
        Self {
            family: family.to_string(),
            given: None,
        }
    }
}

/// A CSL date variable: `{"date-parts": [[year, month?, day?]]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(rename = "date-parts")]
    pub date_parts: Vec<Vec<i32>>,
}

impl DateParts {
    pub fn new(parts: Vec<i32>) -> Self {
        Self {
            date_parts: vec![parts],
        }
    }

    /// Components of the first (and only) date.
    pub fn parts(&self) -> &[i32] {
        self.date_parts
            .first()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// The value of one document field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(DateParts),
    Names(Vec<Name>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateParts> {
        match self {
            FieldValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[Name]> {
        match self {
            FieldValue::Names(n) => Some(n.as_slice()),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// A CSL-JSON item, built fresh for every transformed record.
///
/// `id` is always serialized first with [`ITEM_ID`]; the remaining fields
/// follow in insertion order. Re-inserting a field replaces its value but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    fields: IndexMap<String, FieldValue>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &'static str {
        ITEM_ID
    }

    /// Sets `key`, returning the value it replaced.
    ///
    /// `id` is fixed and cannot be set; attempts are ignored.
    pub fn insert(&mut self, key: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        if key == "id" {
            return None;
        }
        self.fields.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn contains(&self, key: &str) -> bool {
        key == "id" || self.fields.contains_key(key)
    }

    /// Number of fields besides `id`.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }
}

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("id", ITEM_ID)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
