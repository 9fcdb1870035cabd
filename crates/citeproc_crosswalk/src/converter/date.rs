/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use citeproc_date::PartialDate;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::document::{DateParts, FieldValue, OutputDocument};
use crate::metadata::is_blank;

/// Writes the first value as a `date-parts` date.
///
/// Only as much precision as the value carries is emitted. When only a
/// leading part of the value is a date, that part is written and the value
/// is reported. A value without a readable year is reported and skipped.
pub fn insert_date(
    doc: &mut OutputDocument,
    field: &str,
    values: &[&str],
    sink: &mut dyn DiagnosticSink,
) {
    let Some(value) = values.first().filter(|v| !is_blank(v)) else {
        return;
    };
    let date = match value.parse::<PartialDate>() {
        Ok(date) => date,
        Err(_) => match PartialDate::parse_prefix(value) {
            Ok(date) => {
                sink.report(Diagnostic::PartialDate {
                    field: field.to_string(),
                    value: value.to_string(),
                });
                date
            }
            Err(_) => {
                sink.report(Diagnostic::UnparseableDate {
                    field: field.to_string(),
                    value: value.to_string(),
                });
                return;
            }
        },
    };
    doc.insert(field, FieldValue::Date(DateParts::new(date.parts())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn convert(values: &[&str]) -> (OutputDocument, Diagnostics) {
        let mut doc = OutputDocument::new();
        let mut diagnostics = Diagnostics::new();
        insert_date(&mut doc, "issued", values, &mut diagnostics);
        (doc, diagnostics)
    }

    fn parts(doc: &OutputDocument) -> Vec<i32> {
        doc.get("issued")
            .and_then(FieldValue::as_date)
            .map(|d| d.parts().to_vec())
            .unwrap()
    }

    #[test]
    fn test_year_month() {
        let (doc, diagnostics) = convert(&["2002-05"]);
        assert_eq!(parts(&doc), vec![2002, 5]);
        assert!(diagnostics.is_empty());
        assert_eq!(
            serde_json::to_value(doc.get("issued").unwrap()).unwrap(),
            serde_json::json!({"date-parts": [[2002, 5]]})
        );
    }

    #[test]
    fn test_precision_levels() {
        assert_eq!(parts(&convert(&["2002"]).0), vec![2002]);
        assert_eq!(parts(&convert(&["2002-05-17"]).0), vec![2002, 5, 17]);
        assert_eq!(
            parts(&convert(&["2002-05-17T10:00:00Z"]).0),
            vec![2002, 5, 17]
        );
    }

    #[test]
    fn test_writes_to_requested_field() {
        let mut doc = OutputDocument::new();
        insert_date(&mut doc, "accessed", &["2019-01"], &mut Diagnostics::new());
        assert!(doc.contains("accessed"));
        assert!(!doc.contains("issued"));
    }

    #[test]
    fn test_only_first_value_used() {
        let (doc, _) = convert(&["1999", "2005-06"]);
        assert_eq!(parts(&doc), vec![1999]);
    }

    #[test]
    fn test_bad_month_keeps_year() {
        let (doc, diagnostics) = convert(&["2002-14-01"]);
        assert_eq!(parts(&doc), vec![2002]);
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::PartialDate {
                field: "issued".to_string(),
                value: "2002-14-01".to_string()
            }]
        );
    }

    #[test]
    fn test_other_separators_keep_year() {
        let (doc, diagnostics) = convert(&["2002/05/17"]);
        assert_eq!(parts(&doc), vec![2002]);
        assert!(matches!(
            diagnostics.into_vec().as_slice(),
            [Diagnostic::PartialDate { .. }]
        ));
    }

    #[test]
    fn test_five_digit_year_is_unparseable() {
        for value in ["12345", "20021"] {
            let (doc, diagnostics) = convert(&[value]);
            assert!(!doc.contains("issued"), "{}", value);
            assert_eq!(
                diagnostics.into_vec(),
                vec![Diagnostic::UnparseableDate {
                    field: "issued".to_string(),
                    value: value.to_string()
                }]
            );
        }
    }

    #[test]
    fn test_timestamp_is_not_partial() {
        let (_, diagnostics) = convert(&["2013-11-04T21:03:45Z"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unparseable_is_reported_and_skipped() {
        let (doc, diagnostics) = convert(&["sometime in spring"]);
        assert!(!doc.contains("issued"));
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::UnparseableDate {
                field: "issued".to_string(),
                value: "sometime in spring".to_string()
            }]
        );
    }

    #[test]
    fn test_blank_or_missing() {
        let (doc, diagnostics) = convert(&[]);
        assert_eq!(doc.field_count(), 0);
        let (doc, _) = convert(&["  "]);
        assert_eq!(doc.field_count(), 0);
        assert!(diagnostics.is_empty());
    }
}
