#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;

#[test]
fn from_error_count_returns_some_for_nonzero() {
    assert!(ErrorGuaranteed::from_error_count(1).is_some());
    assert!(ErrorGuaranteed::from_error_count(42).is_some());
}

#[test]
fn from_error_count_returns_none_for_zero() {
    assert!(ErrorGuaranteed::from_error_count(0).is_none());
}

#[test]
fn display_shows_error_message() {
    let guarantee = ErrorGuaranteed::from_error_count(3).unwrap();
    assert_eq!(guarantee.to_string(), "error(s) emitted");
}
