//! The diagnostic value produced by every check.
//!
//! Diagnostics point at model declarations through [`Span`]s. The primary
//! label names the declaration at fault; secondary labels name related ones,
//! such as the final class being extended or the ancestor field being
//! shadowed.

use bon_ir::Span;
use std::fmt;

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declaration highlighted by a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// The declaration at fault, as opposed to related context.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message.into(), true)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message.into(), false)
    }

    fn new(span: Span, message: String, is_primary: bool) -> Self {
        Label {
            span,
            message,
            is_primary,
        }
    }
}

/// A fix hint.
///
/// Naming rules know the corrected identifier; tools may offer it as a
/// rename of the primary declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    pub message: String,
    /// The identifier that should replace the declared one.
    pub replacement: Option<String>,
}

impl Suggestion {
    pub fn text(message: impl Into<String>) -> Self {
        Suggestion {
            message: message.into(),
            replacement: None,
        }
    }

    pub fn rename(message: impl Into<String>, replacement: impl Into<String>) -> Self {
        Suggestion {
            message: message.into(),
            replacement: Some(replacement.into()),
        }
    }
}

/// A problem found in a model, ready to render.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    #[cold]
    pub fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self::new(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self::new(code, Severity::Warning)
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..self
        }
    }

    /// Highlight the declaration at fault.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Highlight a related declaration.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, message: impl Into<String>) -> Self {
        self.suggestions.push(Suggestion::text(message));
        self
    }

    /// Suggest renaming the primary declaration to `replacement`.
    pub fn with_rename(mut self, message: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.suggestions.push(Suggestion::rename(message, replacement));
        self
    }

    /// Span of the first primary label. Diagnostics are ordered by it.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find_map(|label| label.is_primary.then_some(label.span))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Plain one-block rendering, used in logs and test failure output.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let arrow = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {arrow} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {}", suggestion.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
