//! Diagnostic system for bonScript model checking.
//!
//! - Error codes for searchability (`bonc explain E1005`)
//! - Clear messages (what went wrong)
//! - Primary label (which declaration)
//! - Secondary labels (related declarations, e.g. the shadowed ancestor field)
//! - Suggestions (how to fix)
//!
//! Validation never stops at the first problem: checkers push every finding
//! into a [`queue::DiagnosticQueue`] and the driver renders the whole batch.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is proof that at least one error was recorded. It is
//! only constructed from a non-zero error count, so a run cannot fail without
//! a diagnostic to show for it.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity, Suggestion};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use guarantee::ErrorGuaranteed;
