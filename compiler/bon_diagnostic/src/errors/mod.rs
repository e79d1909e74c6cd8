//! Long-form explanations shown by `bonc explain`.
//!
//! One markdown file per code lives next to this module and is compiled into
//! the binary. A new code needs its file and a line in the `explanations!`
//! invocation; the tests fail for any code left out.

use crate::ErrorCode;

macro_rules! explanations {
    ($($code:ident),* $(,)?) => {
        static DOCS: &[(ErrorCode, &str)] = &[
            $((ErrorCode::$code, include_str!(concat!(stringify!($code), ".md")))),*
        ];
    };
}

explanations![
    E1001, E1002, E1003, E1004, E1005, E1006, E1007,
    E1010, E1011, E1012, E1013, E1014,
    E2001, E2002, E2003,
    E9001,
];

/// Lookup into the embedded explanations.
pub struct ErrorDocs;

impl ErrorDocs {
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter()
            .find_map(|&(documented, text)| (documented == code).then_some(text))
    }

    /// Codes with an explanation, in ascending order.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|&(code, _)| code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        Self::get(code).is_some()
    }
}

#[cfg(test)]
mod tests;
