/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Generating a citation string for an item.
//!
//! The crosswalk produces the CSL-JSON; a [`CitationRenderer`] (an external
//! CSL processor) turns it into text. [`CitationTask`] holds the decisions
//! around that handoff: which field receives the citation, whether an
//! existing citation is kept, and how failures are reported.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::crosswalk::CrosswalkEngine;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::CrosswalkError;
use crate::metadata::{FieldId, FieldIdError, MetadataSource};

/// Failures reported by a [`CitationRenderer`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no usable citation style {0:?}")]
    Style(String),

    #[error("no usable locale {0:?}")]
    Locale(String),

    #[error("renderer failed: {0}")]
    Failed(String),
}

/// Renders one CSL-JSON item with a citation style and locale.
pub trait CitationRenderer {
    fn render(&self, item_json: &str, style: &str, locale: &str) -> Result<String, RenderError>;
}

impl<F> CitationRenderer for F
where
    F: Fn(&str, &str, &str) -> Result<String, RenderError>,
{
    fn render(&self, item_json: &str, style: &str, locale: &str) -> Result<String, RenderError> {
        self(item_json, style, locale)
    }
}

#[derive(Debug, Error)]
pub enum CitationError {
    #[error("invalid citation field {field:?}: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: FieldIdError,
    },

    #[error("problem extracting metadata from item: {0}")]
    Crosswalk(#[from] CrosswalkError),

    #[error("problem generating citation: {0}")]
    Render(#[from] RenderError),
}

/// Settings for [`CitationTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CitationOptions {
    /// Field that receives the citation.
    pub field: String,
    /// Replace an existing citation.
    pub force: bool,
    /// Citation style identifier.
    pub style: String,
    /// Locale identifier; `en_GB` and `en-GB` are equivalent.
    pub locale: String,
}

impl Default for CitationOptions {
    fn default() -> Self {
        Self {
            field: "dc.identifier.citation".to_string(),
            force: false,
            style: "apa6".to_string(),
            locale: "en-GB".to_string(),
        }
    }
}

/// Converts a locale identifier to the hyphenated form style processors use.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-")
}

/// What happened when generating a citation for one item.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The item already has a citation and `force` is off.
    Skipped { reason: String },
    /// A citation was produced; the caller stores it in `field`.
    Generated { field: FieldId, citation: String },
    /// The renderer returned nothing.
    Empty,
    Failed(CitationError),
}

impl TaskOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, TaskOutcome::Generated { .. })
    }

    pub fn citation(&self) -> Option<&str> {
        match self {
            TaskOutcome::Generated { citation, .. } => Some(citation.as_str()),
            _ => None,
        }
    }
}

/// Generates citations for items with a crosswalk and a renderer.
///
/// The task never modifies the item; writing a generated citation back is
/// up to the caller.
#[derive(Debug)]
pub struct CitationTask<'e, R> {
    engine: &'e CrosswalkEngine,
    renderer: R,
    options: CitationOptions,
}

impl<'e, R: CitationRenderer> CitationTask<'e, R> {
    pub fn new(engine: &'e CrosswalkEngine, renderer: R, options: CitationOptions) -> Self {
        Self {
            engine,
            renderer,
            options,
        }
    }

    pub fn options(&self) -> &CitationOptions {
        &self.options
    }

    pub fn perform(&self, record: &impl MetadataSource) -> TaskOutcome {
        self.perform_with(record, &mut TracingSink)
    }

    pub fn perform_with(
        &self,
        record: &dyn MetadataSource,
        sink: &mut dyn DiagnosticSink,
    ) -> TaskOutcome {
        let field: FieldId = match self.options.field.parse() {
            Ok(field) => field,
            Err(source) => {
                return TaskOutcome::Failed(CitationError::InvalidField {
                    field: self.options.field.clone(),
                    source,
                })
            }
        };

        if record.first_value(&field).is_some() && !self.options.force {
            let reason = format!("item already has a citation in {}", field);
            info!("{}, skipping", reason);
            return TaskOutcome::Skipped { reason };
        }

        match self.render(record, sink) {
            Ok(citation) if citation.is_empty() => {
                info!("empty citation generated");
                TaskOutcome::Empty
            }
            Ok(citation) => TaskOutcome::Generated { field, citation },
            Err(e) => TaskOutcome::Failed(e),
        }
    }

    fn render(
        &self,
        record: &dyn MetadataSource,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<String, CitationError> {
        let doc = self.engine.transform_with(record, sink);
        let json = doc.to_json().map_err(CrosswalkError::from)?;
        let locale = normalize_locale(&self.options.locale);
        let citation = self.renderer.render(&json, &self.options.style, &locale)?;
        Ok(citation.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrosswalkConfig, Properties};
    use crate::diagnostics::Diagnostics;
    use crate::metadata::MetadataRecord;
    use std::cell::RefCell;

    fn engine() -> CrosswalkEngine {
        let properties: Properties = [("field.title", "dc.title")].into_iter().collect();
        CrosswalkEngine::new(CrosswalkConfig::from_properties(
            &properties,
            &mut Diagnostics::new(),
        ))
    }

    struct Recording {
        calls: RefCell<Vec<(String, String, String)>>,
        output: String,
    }

    impl CitationRenderer for Recording {
        fn render(
            &self,
            item_json: &str,
            style: &str,
            locale: &str,
        ) -> Result<String, RenderError> {
            self.calls.borrow_mut().push((
                item_json.to_string(),
                style.to_string(),
                locale.to_string(),
            ));
            Ok(self.output.clone())
        }
    }

    fn recording(output: &str) -> Recording {
        Recording {
            calls: RefCell::new(Vec::new()),
            output: output.to_string(),
        }
    }

    #[test]
    fn test_generates_citation() {
        let engine = engine();
        let options = CitationOptions {
            locale: "en_NZ".to_string(),
            ..Default::default()
        };
        let task = CitationTask::new(&engine, recording("Radio. (2002).\n"), options);
        let record = MetadataRecord::from_pairs([("dc.title", "Radio")]).unwrap();

        let outcome = task.perform(&record);
        assert!(outcome.is_generated());
        assert_eq!(outcome.citation(), Some("Radio. (2002)."));

        let calls = task.renderer.calls.borrow();
        assert_eq!(
            calls[0],
            (
                r#"{"id":"ITEM-1","title":"Radio"}"#.to_string(),
                "apa6".to_string(),
                "en-NZ".to_string()
            )
        );
    }

    #[test]
    fn test_existing_citation_skipped_unless_forced() {
        let engine = engine();
        let record = MetadataRecord::from_pairs([
            ("dc.title", "Radio"),
            ("dc.identifier.citation", "Old citation"),
        ])
        .unwrap();

        let task = CitationTask::new(&engine, recording("New"), CitationOptions::default());
        assert!(matches!(task.perform(&record), TaskOutcome::Skipped { .. }));
        assert!(task.renderer.calls.borrow().is_empty());

        let options = CitationOptions {
            force: true,
            ..Default::default()
        };
        let task = CitationTask::new(&engine, recording("New"), options);
        match task.perform(&record) {
            TaskOutcome::Generated { field, citation } => {
                assert_eq!(field.to_string(), "dc.identifier.citation");
                assert_eq!(citation, "New");
            }
            other => panic!("expected a citation, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_existing_citation_is_replaced() {
        let engine = engine();
        let record = MetadataRecord::from_pairs([("dc.identifier.citation", "  ")]).unwrap();
        let task = CitationTask::new(&engine, recording("New"), CitationOptions::default());
        assert!(task.perform(&record).is_generated());
    }

    #[test]
    fn test_empty_render() {
        let engine = engine();
        let task = CitationTask::new(&engine, recording("  \n"), CitationOptions::default());
        assert!(matches!(
            task.perform(&MetadataRecord::new()),
            TaskOutcome::Empty
        ));
    }

    #[test]
    fn test_render_failure() {
        let engine = engine();
        let renderer = |_: &str, style: &str, _: &str| -> Result<String, RenderError> {
            Err(RenderError::Style(style.to_string()))
        };
        let options = CitationOptions {
            style: "no-such-style".to_string(),
            ..Default::default()
        };
        let task = CitationTask::new(&engine, renderer, options);
        let outcome = task.perform(&MetadataRecord::new());
        match outcome {
            TaskOutcome::Failed(CitationError::Render(RenderError::Style(style))) => {
                assert_eq!(style, "no-such-style");
            }
            other => panic!("expected a style failure, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_field() {
        let engine = engine();
        let options = CitationOptions {
            field: "citation".to_string(),
            ..Default::default()
        };
        let task = CitationTask::new(&engine, recording("x"), options);
        assert!(matches!(
            task.perform(&MetadataRecord::new()),
            TaskOutcome::Failed(CitationError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_options_from_yaml() {
        let options: CitationOptions =
            serde_yaml::from_str("style: chicago-author-date\nforce: true\n").unwrap();
        assert_eq!(options.style, "chicago-author-date");
        assert!(options.force);
        assert_eq!(options.field, "dc.identifier.citation");
        assert_eq!(options.locale, "en-GB");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en_GB"), "en-GB");
        assert_eq!(normalize_locale(" mi-NZ "), "mi-NZ");
    }
}
