/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use indexmap::IndexMap;

use super::Converter;
use crate::config::{Properties, CONVERTER_KEY};
use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Converters by the name field mappings refer to them with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConverterRegistry {
    converters: IndexMap<String, Converter>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every `converter.<name> = <implementation>` entry.
    ///
    /// Unknown implementations are reported and left out; mappings that use
    /// their name fall back to copying raw values.
    pub fn from_properties(properties: &Properties, sink: &mut dyn DiagnosticSink) -> Self {
        let mut registry = Self::new();
        for (key, implementation) in properties.iter() {
            let Some(caps) = CONVERTER_KEY.captures(key) else {
                continue;
            };
            let name = &caps[1];
            match Converter::from_implementation(implementation) {
                Some(converter) => {
                    registry.register(name, converter);
                }
                None => sink.report(Diagnostic::UnknownConverter {
                    name: name.to_string(),
                    implementation: implementation.to_string(),
                }),
            }
        }
        registry
    }

    /// Adds `converter` under `name`, returning any converter it replaced.
    pub fn register(&mut self, name: &str, converter: Converter) -> Option<Converter> {
        self.converters.insert(name.to_string(), converter)
    }

    pub fn get(&self, name: &str) -> Option<Converter> {
        self.converters.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.converters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
