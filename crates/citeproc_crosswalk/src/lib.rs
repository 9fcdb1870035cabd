/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Citeproc crosswalk
//!
//! This crate converts a repository item's metadata into a CSL-JSON item that
//! a citation processor can render. Which metadata fields feed which CSL
//! variables is configuration, as is the choice of converter for fields that
//! need more than a copy: partial dates, inverted personal names, page
//! ranges and publication types.
//!
//! # Example
//!
//! ```rust
//! use citeproc_crosswalk::{
//!     CrosswalkConfig, CrosswalkEngine, Diagnostics, MetadataRecord, Properties,
//! };
//!
//! let properties = Properties::parse(r#"
//! converter.date = date
//! converter.name = name
//! converter.type = otago-type
//! field.type = dc.type(type)
//! field.author = dc.contributor.author(name)
//! field.issued = dc.date.issued(date)
//! field.title = dc.title
//! "#);
//!
//! let mut diagnostics = Diagnostics::new();
//! let config = CrosswalkConfig::from_properties(&properties, &mut diagnostics);
//! assert!(diagnostics.is_empty());
//! let engine = CrosswalkEngine::new(config);
//!
//! let record = MetadataRecord::from_pairs([
//!     ("dc.type", "Conference Paper"),
//!     ("dc.contributor.author", "Razlogova, Elena"),
//!     ("dc.date.issued", "2002-05"),
//!     ("dc.title", "Radio and Astonishment"),
//! ]).unwrap();
//!
//! let json = engine.transform(&record).to_json().unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"id":"ITEM-1","type":"paper-conference","author":[{"family":"Razlogova","given":"Elena"}],"issued":{"date-parts":[[2002,5]]},"title":"Radio and Astonishment"}"#
//! );
//! ```

pub mod citation;
pub mod config;
pub mod converter;
pub mod crosswalk;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod mapping;
pub mod metadata;

pub use citation::{
    CitationError, CitationOptions, CitationRenderer, CitationTask, RenderError, TaskOutcome,
};
pub use config::{CrosswalkConfig, Properties};
pub use converter::{Converter, ConverterRegistry, Institution};
pub use crosswalk::CrosswalkEngine;
pub use diagnostics::{
    Diagnostic, DiagnosticSink, Diagnostics, IgnoreDiagnostics, Severity, TracingSink,
};
pub use document::{DateParts, FieldValue, Name, OutputDocument, ITEM_ID, MIME_TYPE};
pub use error::{ConfigError, CrosswalkError};
pub use mapping::{FieldMapping, FieldMappingTable};
pub use metadata::{FieldId, MetadataRecord, MetadataSource};
