//! One generation run over a model.
//!
//! The run owns the resolution cache. Validation fills it, the emitter side
//! reads the memoized descriptors, and [`GenerationRun::finish`] resets it so
//! nothing leaks into the next run.

use bon_check::{check_model, CheckConfig, CheckResult};
use bon_diagnostic::queue::{DiagnosticConfig, DiagnosticQueue};
use bon_diagnostic::{Diagnostic, ErrorCode};
use bon_ir::{FieldId, Model, Span};
use bon_types::{Descriptor, ResolutionCache};
use rustc_hash::FxHashSet;

/// A field together with its resolved data type.
#[derive(Copy, Clone, Debug)]
pub struct ResolvedField<'r> {
    pub field: FieldId,
    /// `None` when the field's type failed to resolve.
    pub descriptor: Option<&'r Descriptor>,
}

/// What makes two resolution failures the same failure.
#[derive(Clone, PartialEq, Eq, Hash)]
struct FailureKey {
    code: ErrorCode,
    message: String,
    span: Option<Span>,
}

impl FailureKey {
    fn of(diagnostic: &Diagnostic) -> Self {
        FailureKey {
            code: diagnostic.code,
            message: diagnostic.message.clone(),
            span: diagnostic.primary_span(),
        }
    }
}

pub struct GenerationRun<'m> {
    model: &'m Model,
    cache: ResolutionCache,
    config: CheckConfig,
}

impl<'m> GenerationRun<'m> {
    pub fn new(model: &'m Model, config: CheckConfig) -> Self {
        Self::with_cache(model, ResolutionCache::new(), config)
    }

    /// Start a run reusing the cache of a finished one.
    pub fn with_cache(model: &'m Model, mut cache: ResolutionCache, config: CheckConfig) -> Self {
        cache.clear();
        GenerationRun {
            model,
            cache,
            config,
        }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Validate the model and resolve every typedef.
    ///
    /// A typedef failure a field already reported is not reported twice. The
    /// message names the failing typedef or type, so spans alone never merge
    /// two distinct failures of models loaded without positions.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn check(&mut self) -> CheckResult {
        let result = check_model(self.model, &mut self.cache, &self.config);

        let mut reported: FxHashSet<FailureKey> =
            result.diagnostics.iter().map(FailureKey::of).collect();
        let mut extra = Vec::new();
        for (_, typedef) in self.model.typedefs() {
            if let Err(error) = self.cache.resolve(self.model, typedef.data_type) {
                let diagnostic = error.to_diagnostic();
                if reported.insert(FailureKey::of(&diagnostic)) {
                    extra.push(diagnostic);
                }
            }
        }
        if extra.is_empty() {
            return result;
        }

        let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
        queue.extend(result.diagnostics);
        queue.extend(extra);
        let error_count = queue.error_count();
        let warning_count = queue.warning_count();
        CheckResult {
            diagnostics: queue.flush(),
            error_count,
            warning_count,
        }
    }

    /// The descriptor table an emitter consumes, in field declaration order.
    pub fn resolved_fields(&mut self) -> Vec<ResolvedField<'_>> {
        for (id, field) in self.model.fields() {
            if let Err(error) = self.cache.resolve(self.model, field.data_type) {
                tracing::trace!(field = id.raw(), %error, "field left unresolved");
            }
        }
        self.model
            .fields()
            .map(|(id, field)| ResolvedField {
                field: id,
                descriptor: self.cache.get(field.data_type),
            })
            .collect()
    }

    /// End the run, handing back the emptied cache.
    pub fn finish(mut self) -> ResolutionCache {
        self.cache.clear();
        self.cache
    }
}
