#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use bon_ir::Span;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use super::*;
use crate::ErrorCode;

fn render(diagnostics: &[Diagnostic]) -> Value {
    let mut emitter = JsonEmitter::new(Vec::new());
    emitter.emit_all(diagnostics);
    emitter.flush();
    serde_json::from_slice(&emitter.into_inner()).unwrap()
}

#[test]
fn test_json_document_shape() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("recursive typedefs around `p.A`")
        .with_label(Span::new(10, 15), "`p.A` is reached again while resolving it")
        .with_secondary_label(Span::new(30, 40), "type of field `x`");

    assert_eq!(
        render(&[diag]),
        json!([{
            "code": "E2001",
            "severity": "error",
            "message": "recursive typedefs around `p.A`",
            "labels": [
                { "start": 10, "end": 15, "message": "`p.A` is reached again while resolving it", "primary": true },
                { "start": 30, "end": 40, "message": "type of field `x`", "primary": false }
            ]
        }])
    );
}

#[test]
fn test_rename_carries_replacement() {
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_message("field name `Amount` should start with a lower case letter")
        .with_rename("rename the field to `amount`", "amount")
        .with_note("field \"Amount\"");

    let value = render(&[diag]);
    assert_eq!(value[0]["suggestions"][0]["replacement"], "amount");
    assert_eq!(value[0]["notes"][0], "field \"Amount\"");
}

#[test]
fn test_empty_and_multiple() {
    assert_eq!(render(&[]), json!([]));

    let first = Diagnostic::error(ErrorCode::E1001).with_message("class `order`");
    let second = Diagnostic::warning(ErrorCode::E1014).with_message("size");
    let value = render(&[first, second]);
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["severity"], "warning");
    assert!(value[1].get("suggestions").is_none());
}
