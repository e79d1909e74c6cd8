//! Stable codes for every front-end diagnostic.
//!
//! The leading digit names the pass that reports the code:
//! `E1xxx` structural checks, `E2xxx` type resolution and `E9xxx` models
//! that break invariants the parser should already guarantee.

use std::fmt;

macro_rules! error_codes {
    ($($code:ident => $description:literal,)*) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub enum ErrorCode {
            $(#[doc = $description] $code,)*
        }

        impl ErrorCode {
            /// Every code, in ascending order.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$code),*];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(ErrorCode::$code => stringify!($code),)*
                }
            }

            /// One line summary, the fallback of `bonc explain`.
            pub const fn description(&self) -> &'static str {
                match self {
                    $(ErrorCode::$code => $description,)*
                }
            }
        }
    };
}

error_codes! {
    E1001 => "class name does not start with an upper case letter",
    E1002 => "class extends a final class",
    E1003 => "field name does not start with a lower case letter",
    E1004 => "field name is not unique within its class",
    E1005 => "field shadows a field of an extended class",
    E1006 => "required/optional marker on a field with a typedef'd type",
    E1007 => "optional marker conflicts with a lower case data type",
    E1010 => "timestamp fractional seconds out of range",
    E1011 => "number mantissa out of range",
    E1012 => "decimal mantissa out of range",
    E1013 => "decimal scale out of range",
    E1014 => "field size out of range",
    E2001 => "recursive typedef",
    E2002 => "elementary type has no target representation",
    E2003 => "enum type without an enum reference",
    E9001 => "data type without an enclosing package",
}

impl ErrorCode {
    fn pass_digit(self) -> u8 {
        self.as_str().as_bytes()[1]
    }

    /// Naming, inheritance, field marker and length rules.
    pub fn is_structural_error(&self) -> bool {
        self.pass_digit() == b'1'
    }

    /// Typedef and elementary type resolution.
    pub fn is_resolution_error(&self) -> bool {
        self.pass_digit() == b'2'
    }

    pub fn is_internal_error(&self) -> bool {
        self.pass_digit() == b'9'
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `E1005` as well as `e1005`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
