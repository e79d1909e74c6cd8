use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1005)
        .with_message("field `id` occurs in extended class `shop.Base` already")
        .with_label(Span::new(40, 42), "shadows an inherited field")
        .with_secondary_label(Span::new(10, 12), "declared in `shop.Base` here")
        .with_note("shadowing is not allowed in bonaparte");

    assert_eq!(diag.code, ErrorCode::E1005);
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.primary_span(), Some(Span::new(40, 42)));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::E1014).with_message("field size");
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_rename_suggestion() {
    let diag = Diagnostic::error(ErrorCode::E1001).with_rename("rename the class to `Order`", "Order");
    assert_eq!(
        diag.suggestions,
        vec![Suggestion {
            message: "rename the class to `Order`".to_owned(),
            replacement: Some("Order".to_owned()),
        }]
    );
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("class name `order` should start with an upper case letter")
        .with_label(Span::new(0, 5), "class declared here")
        .with_rename("rename the class to `Order`", "Order");

    assert_eq!(
        diag.to_string(),
        "error [E1001]: class name `order` should start with an upper case letter\n  \
         --> 0..5: class declared here\n  \
         = help: rename the class to `Order`"
    );
}

#[test]
fn test_secondary_only_has_no_primary_span() {
    let diag = Diagnostic::error(ErrorCode::E1004)
        .with_secondary_label(Span::new(1, 2), "also declared here");
    assert_eq!(diag.primary_span(), None);
}
