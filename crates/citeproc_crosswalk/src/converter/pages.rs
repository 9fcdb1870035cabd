/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use super::{auxiliary_value, Institution};
use crate::document::OutputDocument;
use crate::metadata::{is_blank, MetadataSource};

const UOW_END_PAGE: &str = "pubs.end-page";
const OTAGO_END_PAGE: &str = "otago.bitstream.endpage";

pub(super) fn auxiliary_fields(institution: Institution) -> &'static [&'static str] {
    match institution {
        Institution::Uow => &[UOW_END_PAGE],
        Institution::Otago => &[OTAGO_END_PAGE],
    }
}

fn end_page_field(institution: Institution) -> &'static str {
    match institution {
        Institution::Uow => UOW_END_PAGE,
        Institution::Otago => OTAGO_END_PAGE,
    }
}

/// Writes a page or page range.
///
/// A start value that already holds a range is used as is. Otherwise the
/// institution's end-page field, when set, completes the range.
pub fn insert_pages(
    institution: Institution,
    doc: &mut OutputDocument,
    field: &str,
    record: &dyn MetadataSource,
    values: &[&str],
) {
    let Some(start) = values.first().copied().filter(|v| !is_blank(v)) else {
        return;
    };
    if start.contains('-') {
        doc.insert(field, start);
        return;
    }
    match auxiliary_value(record, end_page_field(institution)) {
        Some(end) => doc.insert(field, format!("{}-{}", start, end)),
        None => doc.insert(field, start),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataRecord;

    fn convert(institution: Institution, record: &MetadataRecord, start: &str) -> Option<String> {
        let mut doc = OutputDocument::new();
        insert_pages(institution, &mut doc, "page", record, &[start]);
        doc.text("page").map(str::to_string)
    }

    #[test]
    fn test_range_used_verbatim() {
        let record = MetadataRecord::from_pairs([("pubs.end-page", "99")]).unwrap();
        assert_eq!(
            convert(Institution::Uow, &record, "45-50"),
            Some("45-50".to_string())
        );
    }

    #[test]
    fn test_start_and_end() {
        let record = MetadataRecord::from_pairs([("pubs.end-page", "50")]).unwrap();
        assert_eq!(
            convert(Institution::Uow, &record, "45"),
            Some("45-50".to_string())
        );

        let record = MetadataRecord::from_pairs([("otago.bitstream.endpage", "212")]).unwrap();
        assert_eq!(
            convert(Institution::Otago, &record, "201"),
            Some("201-212".to_string())
        );
    }

    #[test]
    fn test_start_only() {
        let record = MetadataRecord::new();
        assert_eq!(
            convert(Institution::Otago, &record, "45"),
            Some("45".to_string())
        );
    }

    #[test]
    fn test_institutions_read_their_own_end_page() {
        let record = MetadataRecord::from_pairs([("otago.bitstream.endpage", "50")]).unwrap();
        assert_eq!(
            convert(Institution::Uow, &record, "45"),
            Some("45".to_string())
        );
    }

    #[test]
    fn test_blank_end_page_ignored() {
        let record = MetadataRecord::from_pairs([("pubs.end-page", "   ")]).unwrap();
        assert_eq!(
            convert(Institution::Uow, &record, "45"),
            Some("45".to_string())
        );
    }

    #[test]
    fn test_blank_start_writes_nothing() {
        let record = MetadataRecord::from_pairs([("pubs.end-page", "50")]).unwrap();
        assert_eq!(convert(Institution::Uow, &record, "  "), None);
        assert_eq!(convert(Institution::Otago, &record, ""), None);

        let mut doc = OutputDocument::new();
        insert_pages(Institution::Uow, &mut doc, "page", &record, &[]);
        assert_eq!(doc.field_count(), 0);
    }
}
