//! Diagnostic renderers.
//!
//! - [`TerminalEmitter`]: human-readable text, optionally colored
//! - [`JsonEmitter`]: a JSON array for editors and scripts

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Writes diagnostics to some output.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Write out anything buffered.
    fn flush(&mut self);

    /// Close the report with error and warning totals.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
