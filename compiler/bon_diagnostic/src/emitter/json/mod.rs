//! JSON rendering of diagnostics.
//!
//! Diagnostics are buffered and written as one array on [`flush`], so the
//! output is always a complete document.
//!
//! [`flush`]: DiagnosticEmitter::flush

use std::io::Write;

use serde::Serialize;

use crate::{Diagnostic, Label, Suggestion};

use super::DiagnosticEmitter;

pub struct JsonEmitter<W: Write> {
    writer: W,
    pending: Vec<DiagnosticJson>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            pending: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[derive(Serialize)]
struct DiagnosticJson {
    code: &'static str,
    severity: &'static str,
    message: String,
    labels: Vec<LabelJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<SuggestionJson>,
}

#[derive(Serialize)]
struct LabelJson {
    start: u32,
    end: u32,
    message: String,
    primary: bool,
}

#[derive(Serialize)]
struct SuggestionJson {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    replacement: Option<String>,
}

impl From<&Diagnostic> for DiagnosticJson {
    fn from(diag: &Diagnostic) -> Self {
        DiagnosticJson {
            code: diag.code.as_str(),
            severity: diag.severity.as_str(),
            message: diag.message.clone(),
            labels: diag.labels.iter().map(LabelJson::from).collect(),
            notes: diag.notes.clone(),
            suggestions: diag.suggestions.iter().map(SuggestionJson::from).collect(),
        }
    }
}

impl From<&Label> for LabelJson {
    fn from(label: &Label) -> Self {
        LabelJson {
            start: label.span.start,
            end: label.span.end,
            message: label.message.clone(),
            primary: label.is_primary,
        }
    }
}

impl From<&Suggestion> for SuggestionJson {
    fn from(suggestion: &Suggestion) -> Self {
        SuggestionJson {
            message: suggestion.message.clone(),
            replacement: suggestion.replacement.clone(),
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.pending.push(DiagnosticJson::from(diagnostic));
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if let Err(e) = serde_json::to_writer_pretty(&mut self.writer, &pending) {
            tracing::warn!(error = %e, "failed to write JSON diagnostics");
            return;
        }
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }

    /// Totals are derivable from the array itself.
    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {}
}

#[cfg(test)]
mod tests;
