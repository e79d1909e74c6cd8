//! Structural validation of a bonScript model.
//!
//! A read-only pass over every class and field that reports naming,
//! inheritance and required/optional problems. Checking never stops early:
//! [`check_model`] returns every diagnostic it found, sorted by location.
//!
//! # Module Organization
//!
//! - `classes`: class naming and `extends final` rules
//! - `fields`: field naming, uniqueness, shadowing, required/optional rules,
//!   and resolution failures of field types
//! - `lengths`: length/precision plausibility of elementary types

mod classes;
mod fields;
mod lengths;

use bon_diagnostic::queue::{DiagnosticConfig, DiagnosticQueue};
use bon_diagnostic::{Diagnostic, ErrorGuaranteed};
use bon_ir::Model;
use bon_types::ResolutionCache;

/// Validator settings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CheckConfig {
    /// Check declared lengths and precisions of elementary types.
    pub check_lengths: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            check_lengths: true,
        }
    }
}

/// All diagnostics of one validation pass.
#[derive(Clone, Debug, Default)]
pub struct CheckResult {
    /// Sorted by primary span.
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CheckResult {
    /// Proof of failure when at least one error was found.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    pub fn is_ok(&self) -> bool {
        self.error_count == 0
    }
}

/// Validate every class and field of a model.
///
/// Field data types are resolved through `cache`, so a following emitter
/// pass finds them memoized.
#[tracing::instrument(level = "debug", skip_all, fields(classes = model.classes().count()))]
pub fn check_model(
    model: &Model,
    cache: &mut ResolutionCache,
    config: &CheckConfig,
) -> CheckResult {
    let mut checker = Checker {
        model,
        cache,
        queue: DiagnosticQueue::with_config(DiagnosticConfig::unlimited()),
    };

    for (id, _) in model.classes() {
        checker.check_class(id);
    }
    for (id, _) in model.fields() {
        checker.check_field(id);
    }
    if config.check_lengths {
        checker.check_lengths();
    }

    let error_count = checker.queue.error_count();
    let warning_count = checker.queue.warning_count();
    let diagnostics = checker.queue.flush();
    tracing::debug!(error_count, warning_count, "structural checks complete");
    CheckResult {
        diagnostics,
        error_count,
        warning_count,
    }
}

/// State of one validation pass. The rules live in the submodules.
struct Checker<'a> {
    model: &'a Model,
    cache: &'a mut ResolutionCache,
    queue: DiagnosticQueue,
}

impl Checker<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.queue.add(diagnostic);
    }
}
