/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Output field to source field mappings.
//!
//! A mapping value lists alternative source fields, tried left to right, and
//! optionally names a converter: `dc.contributor.author,dc.creator(name)`.
//! The converter is associated with the first listed source field rather
//! than with the output field, so two mappings starting from the same source
//! field share one converter.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

use crate::config::{Properties, FIELD_KEY};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::metadata::{FieldId, FieldIdError};

static MAPPING_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9.,]+)(?:\((\w+)\))?$").expect("valid mapping value pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("mapping {0:?} is not of the form ids[(converter)]")]
    Syntax(String),

    #[error(transparent)]
    FieldId(#[from] FieldIdError),
}

/// One configured output field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    output: String,
    sources: Vec<FieldId>,
    converter: Option<String>,
}

impl FieldMapping {
    /// Parses a mapping value for the output field `output`.
    pub fn parse(output: &str, value: &str) -> Result<Self, MappingError> {
        let caps = MAPPING_VALUE
            .captures(value)
            .ok_or_else(|| MappingError::Syntax(value.to_string()))?;
        let sources = caps[1]
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<FieldId>, _>>()?;
        Ok(Self {
            output: output.to_string(),
            sources,
            converter: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Source fields in the order they are tried.
    pub fn sources(&self) -> &[FieldId] {
        &self.sources
    }

    /// The converter named by this mapping's own configuration entry.
    pub fn declared_converter(&self) -> Option<&str> {
        self.converter.as_deref()
    }

    fn source_key(&self) -> Option<String> {
        self.sources
            .first()
            .map(|id| id.to_string().to_ascii_lowercase())
    }
}

impl fmt::Display for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<String> = self.sources.iter().map(FieldId::to_string).collect();
        write!(f, "{}", sources.join(","))?;
        if let Some(converter) = &self.converter {
            write!(f, "({})", converter)?;
        }
        Ok(())
    }
}

/// All configured mappings, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMappingTable {
    mappings: IndexMap<String, FieldMapping>,
    converters: IndexMap<String, String>,
}

impl FieldMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every `field.<output>` entry.
    ///
    /// Malformed values and `field.id` are reported and skipped.
    pub fn from_properties(properties: &Properties, sink: &mut dyn DiagnosticSink) -> Self {
        let mut table = Self::new();
        for (key, value) in properties.iter() {
            let Some(caps) = FIELD_KEY.captures(key) else {
                continue;
            };
            let output = &caps[1];
            if output == "id" {
                sink.report(Diagnostic::ReservedField {
                    key: key.to_string(),
                });
                continue;
            }
            match FieldMapping::parse(output, value) {
                Ok(mapping) => table.push(mapping),
                Err(_) => sink.report(Diagnostic::MalformedMapping {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
            }
        }
        table
    }

    /// Adds a mapping, replacing any earlier one for the same output field.
    ///
    /// A declared converter becomes the converter of the mapping's first
    /// source field, for this and every other mapping starting from it.
    pub fn push(&mut self, mapping: FieldMapping) {
        if let (Some(key), Some(converter)) = (mapping.source_key(), &mapping.converter) {
            self.converters.insert(key, converter.clone());
        }
        self.mappings.insert(mapping.output.clone(), mapping);
    }

    /// The converter name that applies to `mapping`.
    pub fn converter_for(&self, mapping: &FieldMapping) -> Option<&str> {
        let key = mapping.source_key()?;
        self.converters.get(&key).map(String::as_str)
    }

    pub fn get(&self, output: &str) -> Option<&FieldMapping> {
        self.mappings.get(output)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
