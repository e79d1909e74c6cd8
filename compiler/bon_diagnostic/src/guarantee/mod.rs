//! Proof that at least one error was recorded.

use std::fmt;

/// Zero-sized proof that an error diagnostic was recorded.
///
/// Obtained from [`crate::queue::DiagnosticQueue::has_errors`] or from an
/// error count, never out of thin air.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Get a guarantee from an error count collected elsewhere.
    ///
    /// Returns `None` when `count` is zero.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}

#[cfg(test)]
mod tests;
