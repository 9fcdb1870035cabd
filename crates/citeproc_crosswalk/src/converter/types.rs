/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Publication type classification.
//!
//! Repository type vocabularies are free text. Each institution's table maps
//! a lower-cased type onto a CSL item type and, for some types, fills `genre`
//! and `URL` from other fields of the record.

use std::fmt;

use super::{auxiliary_value, has_auxiliary_value, Institution};
use crate::document::OutputDocument;
use crate::metadata::{is_blank, MetadataSource};

const SERIES: &str = "dc.relation.ispartofseries";
const URI: &str = "dc.identifier.uri";
const DEGREE_NAME: &str = "thesis.degree.name";
const PART_OF: &str = "dc.relation.isPartOf";

const GENRE: &str = "genre";
const URL: &str = "URL";

pub(super) fn auxiliary_fields(institution: Institution) -> &'static [&'static str] {
    match institution {
        Institution::Uow => &[SERIES, URI, DEGREE_NAME, PART_OF],
        Institution::Otago => &[SERIES, URI, DEGREE_NAME],
    }
}

/// The CSL item types the classification can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CslType {
    Report,
    Thesis,
    ArticleJournal,
    PaperConference,
    Chapter,
    Book,
    MusicalScore,
    Webpage,
    Article,
}

impl CslType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CslType::Report => "report",
            CslType::Thesis => "thesis",
            CslType::ArticleJournal => "article-journal",
            CslType::PaperConference => "paper-conference",
            CslType::Chapter => "chapter",
            CslType::Book => "book",
            CslType::MusicalScore => "musical_score",
            CslType::Webpage => "webpage",
            CslType::Article => "article",
        }
    }
}

impl fmt::Display for CslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_report(value: &str) -> bool {
    value.contains("report") || value == "working paper" || value == "discussion paper"
}

fn is_thesis(value: &str) -> bool {
    value == "thesis" || value == "dissertation"
}

/// Classifies a lower-cased type string.
///
/// `has_part_of` tells the Waikato table whether the item records a
/// containing publication, which turns conference items into chapters.
pub fn classify(institution: Institution, value: &str, has_part_of: bool) -> CslType {
    match institution {
        Institution::Uow => classify_uow(value, has_part_of),
        Institution::Otago => classify_otago(value),
    }
}

fn classify_uow(value: &str, has_part_of: bool) -> CslType {
    if is_report(value) {
        CslType::Report
    } else if is_thesis(value) {
        CslType::Thesis
    } else if value == "journal article" {
        CslType::ArticleJournal
    } else if value.contains("conference") || value == "oral presentation" {
        if has_part_of {
            CslType::Chapter
        } else {
            CslType::PaperConference
        }
    } else if value.contains("chapter") {
        CslType::Chapter
    } else if value.contains("book") || value == "scholarly edition" || value == "monograph" {
        CslType::Book
    } else if value.contains("musical score") {
        CslType::MusicalScore
    } else if value == "website" {
        CslType::Webpage
    } else {
        CslType::Article
    }
}

fn classify_otago(value: &str) -> CslType {
    if is_report(value) {
        CslType::Report
    } else if is_thesis(value) {
        CslType::Thesis
    } else if value == "journal article" {
        CslType::ArticleJournal
    } else if value.contains("conference") && value.contains("paper") {
        CslType::PaperConference
    } else if value == "book" {
        CslType::Book
    } else if value.contains("chapter") {
        CslType::Chapter
    } else if value.contains("musical score") {
        CslType::MusicalScore
    } else if value == "website" {
        CslType::Webpage
    } else {
        CslType::Article
    }
}

/// Classifies every type value in order.
///
/// Each value writes its fields over those of the values before it, so for a
/// repeated type field the last value decides the type. Auxiliary fields set
/// by an earlier value stay unless a later one overwrites them.
pub fn insert_type(
    institution: Institution,
    doc: &mut OutputDocument,
    field: &str,
    record: &dyn MetadataSource,
    values: &[&str],
) {
    let has_part_of = institution == Institution::Uow && has_auxiliary_value(record, PART_OF);
    for raw in values.iter().copied().filter(|v| !is_blank(v)) {
        let value = raw.to_lowercase();
        let csl_type = classify(institution, &value, has_part_of);
        doc.insert(field, csl_type.as_str());

        match (csl_type, institution) {
            (CslType::Report, _) => {
                let genre = auxiliary_value(record, SERIES).unwrap_or(raw);
                doc.insert(GENRE, genre);
                copy_url(doc, record);
            }
            (CslType::Thesis, _) => {
                let genre = match auxiliary_value(record, DEGREE_NAME) {
                    Some(degree) => format!("{}, {}", raw, degree),
                    None => raw.to_string(),
                };
                doc.insert(GENRE, genre);
                if institution == Institution::Uow {
                    copy_url(doc, record);
                }
            }
            (CslType::Book, Institution::Otago) => copy_url(doc, record),
            (CslType::Article, Institution::Uow) => {
                doc.insert(GENRE, value.as_str());
            }
            _ => {}
        }
    }
}

fn copy_url(doc: &mut OutputDocument, record: &dyn MetadataSource) {
    if let Some(uri) = auxiliary_value(record, URI) {
        doc.insert(URL, uri);
    }
}
