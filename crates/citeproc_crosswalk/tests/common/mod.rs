/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use std::path::PathBuf;

use citeproc_crosswalk::{
    CrosswalkConfig, CrosswalkEngine, Diagnostics, MetadataRecord, OutputDocument, Properties,
};

// --- Helper Functions for Test Data Construction ---

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Builds an engine from a fixture, returning the configuration diagnostics.
pub fn load_engine(name: &str) -> (CrosswalkEngine, Diagnostics) {
    let properties = Properties::load(&fixture(name)).expect("fixture should load");
    let mut diagnostics = Diagnostics::new();
    let config = CrosswalkConfig::from_properties(&properties, &mut diagnostics);
    (CrosswalkEngine::new(config), diagnostics)
}

/// The Waikato crosswalk (`.cfg` properties fixture).
pub fn uow_engine() -> CrosswalkEngine {
    load_engine("uow.cfg").0
}

/// The Otago crosswalk (YAML fixture).
pub fn otago_engine() -> CrosswalkEngine {
    load_engine("otago.yaml").0
}

/// Builds an engine from inline `(key, value)` properties.
pub fn engine_from(entries: &[(&str, &str)]) -> (CrosswalkEngine, Diagnostics) {
    let properties: Properties = entries.iter().copied().collect();
    let mut diagnostics = Diagnostics::new();
    let config = CrosswalkConfig::from_properties(&properties, &mut diagnostics);
    (CrosswalkEngine::new(config), diagnostics)
}

pub fn record(pairs: &[(&str, &str)]) -> MetadataRecord {
    MetadataRecord::from_pairs(pairs.iter().copied()).expect("valid field ids")
}

/// Transforms `record`, collecting diagnostics instead of logging them.
pub fn transform(
    engine: &CrosswalkEngine,
    record: &MetadataRecord,
) -> (OutputDocument, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let doc = engine.transform_with(record, &mut diagnostics);
    (doc, diagnostics)
}

pub fn to_value(doc: &OutputDocument) -> serde_json::Value {
    serde_json::to_value(doc).expect("document serializes")
}

/// A journal article as the Waikato repository records it.
pub fn uow_article() -> MetadataRecord {
    record(&[
        ("dc.type", "Journal Article"),
        ("dc.contributor.author", "Schweer, Andrea"),
        ("dc.contributor.author", "Lee, Kim Wai"),
        ("dc.date.issued", "2013-11"),
        ("dc.title", "Institutional repositories in New Zealand"),
        ("pubs.journal", "Library Hi Tech"),
        ("pubs.volume", "31"),
        ("pubs.issue", "4"),
        ("pubs.startpage", "615"),
        ("pubs.end-page", "630"),
        ("dc.identifier.uri", "https://hdl.handle.net/10289/8000"),
    ])
}
