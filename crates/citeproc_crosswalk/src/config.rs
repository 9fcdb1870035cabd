/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Crosswalk configuration.
//!
//! Configuration is a flat set of properties:
//!
//! ```text
//! converter.date = date
//! converter.name = nz.ac.lconz.irr.crosswalk.citeproc.NameConverter
//! field.author = dc.contributor.author,dc.creator(name)
//! field.issued = dc.date.issued(date)
//! field.title = dc.title
//! ```
//!
//! `converter.<name>` registers a converter implementation under a name and
//! `field.<output>` maps an output field onto source metadata fields. YAML
//! files may nest the same keys (`field: {title: dc.title}`).

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_yaml::Value;

use crate::converter::ConverterRegistry;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ConfigError;
use crate::mapping::FieldMappingTable;

pub(crate) static CONVERTER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^converter\.(\w+)$").expect("valid converter key pattern")
});

pub(crate) static FIELD_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^field\.([a-zA-Z\-]+)$").expect("valid field key pattern")
});

/// Ordered configuration properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `.properties`-style text.
    ///
    /// A key ends at the first `=`, `:` or whitespace. The value follows,
    /// after an optional `=` or `:` and any whitespace around it. `#` and `!`
    /// start comment lines, and a trailing `\` continues a value on the next
    /// line. Later duplicates replace earlier ones.
    pub fn parse(text: &str) -> Self {
        let mut properties = Self::new();
        let mut pending = String::new();
        for raw in text.lines() {
            let line = raw.trim_start();
            if pending.is_empty()
                && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
            {
                continue;
            }
            if let Some(continued) = line.strip_suffix('\\') {
                pending.push_str(continued);
                continue;
            }
            pending.push_str(line);
            properties.insert_line(&pending);
            pending.clear();
        }
        if !pending.is_empty() {
            properties.insert_line(&pending);
        }
        properties
    }

    /// Reads a YAML mapping, joining nested keys with `.`.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            format: "YAML".to_string(),
            message: e.to_string(),
        })?;
        let mut properties = Self::new();
        match value {
            Value::Mapping(_) => flatten_yaml(None, value, &mut properties)?,
            Value::Null => {}
            _ => {
                return Err(ConfigError::Parse {
                    format: "YAML".to_string(),
                    message: "expected a mapping at the top level".to_string(),
                })
            }
        }
        Ok(properties)
    }

    /// Loads a configuration file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("properties");
        match ext {
            "yaml" | "yml" => Self::from_yaml(&content),
            _ => Ok(Self::parse(&content)),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_line(&mut self, line: &str) {
        let end = line
            .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
            .unwrap_or(line.len());
        let (key, rest) = line.split_at(end);
        let rest = rest.trim_start();
        let value = rest.strip_prefix(['=', ':']).unwrap_or(rest);
        self.insert(key, value.trim());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

fn yaml_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn flatten_yaml(
    prefix: Option<&str>,
    value: Value,
    properties: &mut Properties,
) -> Result<(), ConfigError> {
    let map = match value {
        Value::Mapping(map) => map,
        other => {
            let key = prefix.unwrap_or_default();
            let scalar = yaml_scalar(&other).ok_or_else(|| ConfigError::Parse {
                format: "YAML".to_string(),
                message: format!("{} must be a scalar or a mapping", key),
            })?;
            properties.insert(key, scalar);
            return Ok(());
        }
    };
    for (key, child) in map {
        let key = yaml_scalar(&key)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::Parse {
                format: "YAML".to_string(),
                message: format!(
                    "unsupported key under {}",
                    prefix.unwrap_or("the top level")
                ),
            })?;
        let full = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key,
        };
        flatten_yaml(Some(&full), child, properties)?;
    }
    Ok(())
}

/// Everything a crosswalk needs, built once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrosswalkConfig {
    registry: ConverterRegistry,
    mappings: FieldMappingTable,
}

impl CrosswalkConfig {
    pub fn new(registry: ConverterRegistry, mappings: FieldMappingTable) -> Self {
        Self { registry, mappings }
    }

    /// Builds the converter registry and then the field mappings.
    ///
    /// This never fails. Unknown converters, malformed mappings and
    /// unrecognized keys are reported to `sink` and skipped.
    pub fn from_properties(properties: &Properties, sink: &mut dyn DiagnosticSink) -> Self {
        for (key, _) in properties.iter() {
            if !CONVERTER_KEY.is_match(key) && !FIELD_KEY.is_match(key) {
                sink.report(Diagnostic::IgnoredProperty {
                    key: key.to_string(),
                });
            }
        }
        let registry = ConverterRegistry::from_properties(properties, sink);
        let mappings = FieldMappingTable::from_properties(properties, sink);
        Self { registry, mappings }
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    pub fn mappings(&self) -> &FieldMappingTable {
        &self.mappings
    }
}
