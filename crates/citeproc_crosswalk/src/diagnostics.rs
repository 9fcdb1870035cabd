/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Warnings raised while building or running a crosswalk.
//!
//! Nothing in this crate logs directly. Configuration loading and
//! transformation report through a [`DiagnosticSink`] supplied by the caller;
//! [`TracingSink`] forwards to `tracing`, [`Diagnostics`] keeps them for
//! inspection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Something the engine worked around rather than failed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A personal name without `", "`; the whole value became the family name.
    NameNotInverted { field: String, value: String },
    /// A date value without a readable year; the field was skipped.
    UnparseableDate { field: String, value: String },
    /// A date value with unreadable text after its leading date; only the
    /// leading part was written.
    PartialDate { field: String, value: String },
    /// A mapping names a converter the registry does not hold; raw values
    /// were copied instead.
    MissingConverter { field: String, converter: String },
    /// A `converter.<name>` entry whose implementation is unknown.
    UnknownConverter {
        name: String,
        implementation: String,
    },
    /// A `field.<name>` entry whose value does not follow the mapping grammar.
    MalformedMapping { key: String, value: String },
    /// A `field.id` entry; the item id is fixed.
    ReservedField { key: String },
    /// A configuration key the crosswalk does not recognize.
    IgnoredProperty { key: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnknownConverter { .. } | Diagnostic::MalformedMapping { .. } => {
                Severity::Error
            }
            _ => Severity::Warning,
        }
    }

    /// Whether this came from reading configuration rather than a record.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnknownConverter { .. }
                | Diagnostic::MalformedMapping { .. }
                | Diagnostic::ReservedField { .. }
                | Diagnostic::IgnoredProperty { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NameNotInverted { field, value } => write!(
                f,
                "{}: name {:?} is not \"family, given\", using it as the family name",
                field, value
            ),
            Diagnostic::UnparseableDate { field, value } => write!(
                f,
                "{}: cannot read a year from {:?}, skipping",
                field, value
            ),
            Diagnostic::PartialDate { field, value } => write!(
                f,
                "{}: only the leading date of {:?} could be read",
                field, value
            ),
            Diagnostic::MissingConverter { field, converter } => write!(
                f,
                "{}: no converter registered as {:?}, copying raw value",
                field, converter
            ),
            Diagnostic::UnknownConverter {
                name,
                implementation,
            } => write!(
                f,
                "converter.{}: unknown implementation {:?}",
                name, implementation
            ),
            Diagnostic::MalformedMapping { key, value } => {
                write!(f, "{}: malformed field mapping {:?}, skipping", key, value)
            }
            Diagnostic::ReservedField { key } => {
                write!(f, "{}: the item id is fixed and cannot be mapped", key)
            }
            Diagnostic::IgnoredProperty { key } => write!(f, "{}: unrecognized key, ignoring", key),
        }
    }
}

/// Receives diagnostics as they happen.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity() == Severity::Error)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    /// Passes everything collected on to another sink.
    pub fn forward(&self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in &self.items {
            sink.report(diagnostic.clone());
        }
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => tracing::error!(target: "citeproc_crosswalk", "{}", diagnostic),
            Severity::Warning => tracing::warn!(target: "citeproc_crosswalk", "{}", diagnostic),
        }
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreDiagnostics;

impl DiagnosticSink for IgnoreDiagnostics {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::IgnoredProperty {
            key: "foo".to_string(),
        });
        diagnostics.report(Diagnostic::UnknownConverter {
            name: "date".to_string(),
            implementation: "com.example.Nope".to_string(),
        });

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.has_errors());
        assert!(diagnostics.iter().all(Diagnostic::is_configuration));
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::IgnoredProperty { .. })
        ));
    }

    #[test]
    fn test_forward() {
        let mut first = Diagnostics::new();
        first.report(Diagnostic::NameNotInverted {
            field: "author".to_string(),
            value: "Prince".to_string(),
        });
        let mut second = Diagnostics::new();
        first.forward(&mut second);
        assert_eq!(first, second);
        assert!(!second.has_errors());
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::MissingConverter {
            field: "issued".to_string(),
            converter: "date".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "issued: no converter registered as \"date\", copying raw value"
        );

        let diagnostic = Diagnostic::PartialDate {
            field: "issued".to_string(),
            value: "2002/05/17".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "issued: only the leading date of \"2002/05/17\" could be read"
        );
        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert!(!diagnostic.is_configuration());
    }
}
