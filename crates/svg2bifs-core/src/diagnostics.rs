//! Non-fatal conversion findings.
//!
//! Every condition that the converter recovers from is recorded here and logged through
//! `tracing`; callers decide whether diagnostics are acceptable (see `ConvertOptions::strict`).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnsupportedElement,
    UnsupportedPaint,
    MissingGeometry,
    MalformedAttribute,
    UnsupportedUnit,
    ContentBeforeRoot,
    NestedInShape,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedElement => "unsupported_element",
            Self::UnsupportedPaint => "unsupported_paint",
            Self::MissingGeometry => "missing_geometry",
            Self::MalformedAttribute => "malformed_attribute",
            Self::UnsupportedUnit => "unsupported_unit",
            Self::ContentBeforeRoot => "content_before_root",
            Self::NestedInShape => "nested_in_shape",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = kind.as_str(), "{message}");
        self.entries.push(Diagnostic { kind, message });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
