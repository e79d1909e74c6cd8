#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use bon_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn shadowing_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E1005)
        .with_message("field `id` occurs in extended class `shop.Base` already")
        .with_label(Span::new(40, 42), "shadows an inherited field")
        .with_secondary_label(Span::new(10, 12), "declared in `shop.Base` here")
        .with_note("shadowing is not allowed in bonaparte")
}

fn render(diagnostic: &Diagnostic, mode: ColorMode) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), mode, false);
    emitter.emit(diagnostic);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_plain_output() {
    assert_eq!(
        render(&shadowing_diagnostic(), ColorMode::Never),
        "error[E1005]: field `id` occurs in extended class `shop.Base` already\n  \
         --> 40..42: shadows an inherited field\n      \
         10..12: declared in `shop.Base` here\n  \
         = note: shadowing is not allowed in bonaparte\n\n"
    );
}

#[test]
fn test_suggestions_render_as_help() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("class name `order` should start with an upper case letter")
        .with_rename("rename the class to `Order`", "Order");
    let text = render(&diag, ColorMode::Never);
    assert!(text.ends_with("  = help: rename the class to `Order`\n\n"));
}

#[test]
fn test_colored_output_contains_escapes() {
    let text = render(&shadowing_diagnostic(), ColorMode::Always);
    assert!(text.starts_with("\x1b[1;31merror\x1b[0m\x1b[1m[E1005]\x1b[0m"));
    assert!(text.contains("\x1b[1;34mdeclared in `shop.Base` here\x1b[0m"));
}

#[test]
fn test_auto_without_tty_is_plain() {
    let text = render(&shadowing_diagnostic(), ColorMode::Auto);
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_color_mode_parse() {
    assert_eq!("never".parse::<ColorMode>(), Ok(ColorMode::Never));
    assert!("sometimes".parse::<ColorMode>().is_err());
}

#[test]
fn test_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(1, 0);
    emitter.emit_summary(0, 0);
    emitter.emit_summary(0, 3);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(
        text,
        "error: model check found 2 errors and 1 warning\n\
         error: model check found 1 error\n\
         warning: model check found 3 warnings\n"
    );
}
