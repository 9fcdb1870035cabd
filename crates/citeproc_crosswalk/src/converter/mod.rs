/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Per-field value converters.
//!
//! A converter turns the raw values of one metadata field into one or more
//! document fields. The set of converters is closed: configuration names an
//! implementation identifier, which [`Converter::from_implementation`] maps
//! onto a variant.

use std::fmt;

use crate::diagnostics::DiagnosticSink;
use crate::document::OutputDocument;
use crate::metadata::{FieldId, MetadataSource};

pub mod date;
pub mod names;
pub mod pages;
pub mod registry;
pub mod types;

pub use registry::ConverterRegistry;

/// Whose repository conventions a converter follows.
///
/// The page and type converters differ per institution in which auxiliary
/// fields they read and in a few classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Institution {
    /// University of Waikato.
    Uow,
    /// University of Otago.
    Otago,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    /// Partial ISO date to `date-parts`.
    Date,
    /// `Family, Given` personal names to CSL names.
    Name,
    /// Start page plus an end-page field to a page range.
    Pages(Institution),
    /// Free-text publication type to a CSL item type.
    Type(Institution),
}

const LEGACY_PREFIX: &str = "nz.ac.lconz.irr.crosswalk.citeproc.";

/// Implementation identifiers accepted in `converter.<name>` entries.
///
/// Each variant has a short identifier and the class name older
/// configuration files use.
pub const IMPLEMENTATIONS: &[(&str, Converter)] = &[
    ("date", Converter::Date),
    ("name", Converter::Name),
    ("uow-pages", Converter::Pages(Institution::Uow)),
    ("otago-pages", Converter::Pages(Institution::Otago)),
    ("uow-type", Converter::Type(Institution::Uow)),
    ("otago-type", Converter::Type(Institution::Otago)),
    ("DateConverter", Converter::Date),
    ("NameConverter", Converter::Name),
    ("UoWPagesConverter", Converter::Pages(Institution::Uow)),
    ("OtagoPagesConverter", Converter::Pages(Institution::Otago)),
    ("UoWTypesConverter", Converter::Type(Institution::Uow)),
    ("OtagoTypeConverter", Converter::Type(Institution::Otago)),
];

impl Converter {
    /// Looks up an implementation identifier.
    ///
    /// Class names are only accepted fully qualified, as configuration
    /// files have always written them.
    pub fn from_implementation(id: &str) -> Option<Self> {
        let id = id.trim();
        let (key, qualified) = match id.strip_prefix(LEGACY_PREFIX) {
            Some(class) => (class, true),
            None => (id, false),
        };
        IMPLEMENTATIONS
            .iter()
            .filter(|(name, _)| qualified == is_class_name(name))
            .find(|(name, _)| *name == key)
            .map(|(_, converter)| *converter)
    }

    /// The short identifier for this converter.
    pub fn identifier(&self) -> &'static str {
        match self {
            Converter::Date => "date",
            Converter::Name => "name",
            Converter::Pages(Institution::Uow) => "uow-pages",
            Converter::Pages(Institution::Otago) => "otago-pages",
            Converter::Type(Institution::Uow) => "uow-type",
            Converter::Type(Institution::Otago) => "otago-type",
        }
    }

    /// Every other record field this converter may read.
    pub fn auxiliary_fields(&self) -> &'static [&'static str] {
        match self {
            Converter::Date | Converter::Name => &[],
            Converter::Pages(institution) => pages::auxiliary_fields(*institution),
            Converter::Type(institution) => types::auxiliary_fields(*institution),
        }
    }

    /// Writes the converted form of `values` into `doc`.
    ///
    /// `field` is the output field being populated and `values` the full
    /// value sequence of the source field that matched. Converters never
    /// fail: unusable input leaves `doc` untouched or degrades, with a
    /// diagnostic where the input was suspect.
    pub fn insert_value(
        &self,
        doc: &mut OutputDocument,
        field: &str,
        record: &dyn MetadataSource,
        values: &[&str],
        sink: &mut dyn DiagnosticSink,
    ) {
        match self {
            Converter::Date => date::insert_date(doc, field, values, sink),
            Converter::Name => names::insert_names(doc, field, values, sink),
            Converter::Pages(institution) => {
                pages::insert_pages(*institution, doc, field, record, values)
            }
            Converter::Type(institution) => {
                types::insert_type(*institution, doc, field, record, values)
            }
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

fn is_class_name(name: &str) -> bool {
    name.ends_with("Converter")
}

/// First value of an auxiliary field, when it is not blank.
fn auxiliary_value<'r>(record: &'r dyn MetadataSource, field: &str) -> Option<&'r str> {
    let id: FieldId = field.parse().ok()?;
    record.first_value(&id)
}

/// Whether an auxiliary field has any non-blank value.
fn has_auxiliary_value(record: &dyn MetadataSource, field: &str) -> bool {
    field
        .parse::<FieldId>()
        .map(|id| record.has_value(&id))
        .unwrap_or(false)
}
