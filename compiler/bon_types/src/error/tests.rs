use bon_diagnostic::ErrorCode;
use bon_ir::Span;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_messages_name_the_failing_declaration() {
    let cycle = ResolutionError::RecursiveTypedef {
        name: "p.A".to_owned(),
        span: Span::new(3, 4),
    };
    assert_eq!(cycle.to_string(), "recursive typedefs around `p.A`");

    let unmapped = ResolutionError::UnmappedType {
        name: "bogus".to_owned(),
        span: Span::DUMMY,
    };
    assert_eq!(unmapped.to_string(), "unmapped data type `bogus`");
}

#[test]
fn test_diagnostic_carries_code_message_and_span() {
    let error = ResolutionError::MissingEnumType {
        name: "enum".to_owned(),
        span: Span::new(10, 14),
    };
    let diagnostic = error.to_diagnostic();

    assert_eq!(diagnostic.code, ErrorCode::E2003);
    assert_eq!(diagnostic.message, error.to_string());
    assert_eq!(diagnostic.primary_span(), Some(Span::new(10, 14)));
    assert_eq!(error.span(), Span::new(10, 14));
}
