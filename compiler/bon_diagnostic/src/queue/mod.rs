//! Collects the findings of a checking pass.
//!
//! Checks push into the queue as they go and never stop early. The queue
//! optionally caps the number of errors kept, drops exact repeats, and hands
//! the batch back ordered by declaration position.

use crate::{Diagnostic, ErrorGuaranteed, Severity};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Errors kept before further ones are only counted. 0 means no cap.
    pub error_limit: usize,
    /// Drop a diagnostic equal to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Keep everything, repeats included.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct Tally {
    errors: usize,
    warnings: usize,
    /// Errors over the limit.
    suppressed: usize,
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    tally: Tally,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Queue a diagnostic. `false` if the limit or deduplication dropped it.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        match diag.severity {
            Severity::Error if self.limit_reached() => {
                self.tally.suppressed += 1;
                return false;
            }
            _ if self.config.deduplicate && self.diagnostics.contains(&diag) => return false,
            Severity::Error => self.tally.errors += 1,
            Severity::Warning => self.tally.warnings += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diag in diagnostics {
            self.add(diag);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit != 0 && self.tally.errors >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.tally.errors
    }

    pub fn warning_count(&self) -> usize {
        self.tally.warnings
    }

    pub fn suppressed_count(&self) -> usize {
        self.tally.suppressed
    }

    /// Proof of failure if any error was seen, including suppressed ones.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.tally.errors + self.tally.suppressed)
    }

    /// Take the queued diagnostics ordered by primary span and reset the queue.
    ///
    /// Diagnostics without a primary label come first. Equal positions keep
    /// the order they were reported in.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(|diag| diag.primary_span().map(|span| (span.start, span.end)));
        self.tally = Tally::default();
        diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
