#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;

#[test]
fn test_get_existing_doc() {
    let doc = ErrorDocs::get(ErrorCode::E2001).unwrap();
    assert!(doc.contains("Recursive Typedef"));
}

#[test]
fn test_every_code_is_documented() {
    for &code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(code), "{code} has no documentation");
    }
}

#[test]
fn test_doc_heading_names_its_code() {
    for code in ErrorDocs::all_codes() {
        let doc = ErrorDocs::get(code).unwrap();
        assert!(
            doc.starts_with(&format!("# {code}:")),
            "{code} documentation starts with the wrong heading"
        );
    }
}

#[test]
fn test_no_duplicate_docs() {
    let codes: Vec<_> = ErrorDocs::all_codes().collect();
    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(
        codes.len(),
        unique.len(),
        "DOCS table contains duplicate error codes"
    );
}
