/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::document::{FieldValue, Name, OutputDocument};
use crate::metadata::is_blank;

const SEPARATOR: &str = ", ";

/// Splits an inverted personal name at the first `", "`.
///
/// Returns `None` for the given name when there is no separator; such names
/// are not split any further.
pub fn split_name(value: &str) -> (&str, Option<&str>) {
    match value.split_once(SEPARATOR) {
        Some((family, given)) => (family, Some(given).filter(|g| !g.is_empty())),
        None => (value, None),
    }
}

/// Writes every non-blank value as a name, in source order.
pub fn insert_names(
    doc: &mut OutputDocument,
    field: &str,
    values: &[&str],
    sink: &mut dyn DiagnosticSink,
) {
    let mut names = Vec::with_capacity(values.len());
    for value in values.iter().filter(|v| !is_blank(v)) {
        if !value.contains(SEPARATOR) {
            sink.report(Diagnostic::NameNotInverted {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        let (family, given) = split_name(value);
        names.push(Name {
            family: family.to_string(),
            given: given.map(str::to_string),
        });
    }
    if !names.is_empty() {
        doc.insert(field, FieldValue::Names(names));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use serde_json::json;

    fn convert(values: &[&str]) -> (OutputDocument, Diagnostics) {
        let mut doc = OutputDocument::new();
        let mut diagnostics = Diagnostics::new();
        insert_names(&mut doc, "author", values, &mut diagnostics);
        (doc, diagnostics)
    }

    #[test]
    fn test_inverted_names() {
        let (doc, diagnostics) = convert(&["Smith, Jane", "Lee, Kim Wai"]);
        assert_eq!(
            serde_json::to_value(doc.get("author").unwrap()).unwrap(),
            json!([
                {"family": "Smith", "given": "Jane"},
                {"family": "Lee", "given": "Kim Wai"}
            ])
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_single_token_name() {
        let (doc, diagnostics) = convert(&["Prince"]);
        assert_eq!(
            serde_json::to_value(doc.get("author").unwrap()).unwrap(),
            json!([{"family": "Prince"}])
        );
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::NameNotInverted {
                field: "author".to_string(),
                value: "Prince".to_string()
            }]
        );
    }

    #[test]
    fn test_splits_on_first_separator_only() {
        assert_eq!(
            split_name("King, Martin Luther, Jr."),
            ("King", Some("Martin Luther, Jr."))
        );
        // No space after the comma: not an inverted name.
        assert_eq!(split_name("Smith,Jane"), ("Smith,Jane", None));
    }

    #[test]
    fn test_empty_given_is_omitted() {
        let (doc, diagnostics) = convert(&["Smith, "]);
        assert_eq!(
            doc.get("author").and_then(FieldValue::as_names),
            Some(&[Name::family_only("Smith")][..])
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_blank_entries_keep_order() {
        let (doc, _) = convert(&["Smith, Jane", "", "  ", "Lee, Kim Wai"]);
        let names = doc.get("author").and_then(FieldValue::as_names).unwrap();
        assert_eq!(
            names,
            &[Name::new("Smith", "Jane"), Name::new("Lee", "Kim Wai")]
        );
    }

    #[test]
    fn test_nothing_usable_writes_nothing() {
        let (doc, _) = convert(&["", " "]);
        assert!(!doc.contains("author"));
    }
}
