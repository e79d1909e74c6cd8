//! Resolution errors.

use bon_diagnostic::{Diagnostic, ErrorCode};
use bon_ir::Span;

/// Why a data type could not be resolved.
///
/// Each error is fatal for the data type being resolved. The caller decides
/// whether it is fatal for the whole run or attributable to one field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    /// A typedef chain leads back to a typedef still being resolved.
    #[error("recursive typedefs around `{name}`")]
    RecursiveTypedef { name: String, span: Span },
    /// The elementary type name has no table entry.
    #[error("unmapped data type `{name}`")]
    UnmappedType { name: String, span: Span },
    /// No package encloses the data type.
    #[error("no enclosing package found for `{name}`")]
    MissingPackage { name: String, span: Span },
    /// An `enum` elementary type without an enumeration.
    #[error("enum data type `{name}` does not reference an enumeration")]
    MissingEnumType { name: String, span: Span },
}

impl ResolutionError {
    /// The declaration the error is reported at.
    pub fn span(&self) -> Span {
        match self {
            ResolutionError::RecursiveTypedef { span, .. }
            | ResolutionError::UnmappedType { span, .. }
            | ResolutionError::MissingPackage { span, .. }
            | ResolutionError::MissingEnumType { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ResolutionError::RecursiveTypedef { .. } => ErrorCode::E2001,
            ResolutionError::UnmappedType { .. } => ErrorCode::E2002,
            ResolutionError::MissingEnumType { .. } => ErrorCode::E2003,
            ResolutionError::MissingPackage { .. } => ErrorCode::E9001,
        }
    }

    /// Convert to a diagnostic with a suggestion.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ResolutionError::RecursiveTypedef { name, span } => diag
                .with_label(*span, format!("`{name}` is reached again while resolving it"))
                .with_suggestion("let one typedef in the chain alias an elementary type or a class"),
            ResolutionError::UnmappedType { name, span } => diag
                .with_label(*span, format!("`{name}` is not an elementary type"))
                .with_suggestion("use a listed elementary type (`bonc explain E2002`)"),
            ResolutionError::MissingPackage { span, .. } => diag
                .with_label(*span, "declared outside of any package")
                .with_note("this is a malformed model, not a schema error"),
            ResolutionError::MissingEnumType { span, .. } => diag
                .with_label(*span, "enumeration expected here")
                .with_suggestion("name the enumeration, e.g. `enum OrderStatus`"),
        }
    }
}

#[cfg(test)]
mod tests;
