/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::config::{CrosswalkConfig, Properties};
use crate::converter::Converter;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::document::{OutputDocument, MIME_TYPE};
use crate::error::Result;
use crate::mapping::FieldMapping;
use crate::metadata::{is_blank, MetadataSource};

/// Turns item metadata into CSL-JSON according to a [`CrosswalkConfig`].
///
/// The engine holds no mutable state, so one instance can serve any number
/// of threads.
#[derive(Debug, Clone, Default)]
pub struct CrosswalkEngine {
    config: CrosswalkConfig,
}

impl CrosswalkEngine {
    pub fn new(config: CrosswalkConfig) -> Self {
        debug!(
            converters = config.registry().len(),
            mappings = config.mappings().len(),
            "crosswalk configured"
        );
        Self { config }
    }

    /// Builds an engine, logging configuration problems through `tracing`.
    pub fn from_properties(properties: &Properties) -> Self {
        let config = CrosswalkConfig::from_properties(properties, &mut TracingSink);
        Self::new(config)
    }

    /// Loads a `.properties` or YAML configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let properties = Properties::load(path)?;
        Ok(Self::from_properties(&properties))
    }

    pub fn config(&self) -> &CrosswalkConfig {
        &self.config
    }

    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Transforms a record, logging diagnostics through `tracing`.
    pub fn transform(&self, record: &impl MetadataSource) -> OutputDocument {
        self.transform_with(record, &mut TracingSink)
    }

    /// Transforms a record, reporting diagnostics to `sink`.
    ///
    /// For each mapping, the first source field with a non-blank value is
    /// used and later alternatives are ignored. Its full value sequence goes
    /// to the mapping's converter; without one, the first non-blank value is
    /// copied. Mappings with no usable source are left out of the document.
    pub fn transform_with(
        &self,
        record: &dyn MetadataSource,
        sink: &mut dyn DiagnosticSink,
    ) -> OutputDocument {
        let mut doc = OutputDocument::new();
        for mapping in self.config.mappings().iter() {
            let converter = self.resolve_converter(mapping, sink);
            self.apply(&mut doc, mapping, converter, record, sink);
        }
        doc
    }

    /// Transforms a record and writes it as JSON.
    pub fn disseminate<W: Write>(&self, record: &impl MetadataSource, mut writer: W) -> Result<()> {
        let doc = self.transform(record);
        doc.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self, record: &impl MetadataSource) -> Result<String> {
        Ok(self.transform(record).to_json()?)
    }

    fn resolve_converter(
        &self,
        mapping: &FieldMapping,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<Converter> {
        let name = self.config.mappings().converter_for(mapping)?;
        let converter = self.config.registry().get(name);
        if converter.is_none() {
            sink.report(Diagnostic::MissingConverter {
                field: mapping.output().to_string(),
                converter: name.to_string(),
            });
        }
        converter
    }

    fn apply(
        &self,
        doc: &mut OutputDocument,
        mapping: &FieldMapping,
        converter: Option<Converter>,
        record: &dyn MetadataSource,
        sink: &mut dyn DiagnosticSink,
    ) {
        for source in mapping.sources() {
            let values = record.values(source);
            let Some(first) = values.iter().copied().find(|v| !is_blank(v)) else {
                continue;
            };
            match converter {
                Some(converter) => {
                    converter.insert_value(doc, mapping.output(), record, &values, sink)
                }
                None => {
                    doc.insert(mapping.output(), first);
                }
            }
            return;
        }
    }
}
