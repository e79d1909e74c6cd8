//! The fixed table of elementary type names.
//!
//! Every elementary type name, after [`crate::naming::canonicalize`], must
//! match one entry here (case-insensitively). The entry decides the target
//! representation and which plausibility rule applies to the declared length.

use std::fmt;

/// What an elementary type name denotes.
///
/// Several table keys may denote the same kind (`int` and `integer`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ElementaryKind {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Number,
    Decimal,
    Byte,
    Short,
    Char,
    Raw,
    Timestamp,
    Day,
    Uppercase,
    Lowercase,
    Ascii,
    Unicode,
    String,
    Enum,
}

/// The elementary type table, keyed by lower case name.
pub const TABLE: &[(&str, ElementaryKind)] = &[
    ("boolean", ElementaryKind::Boolean),
    ("int", ElementaryKind::Int),
    ("integer", ElementaryKind::Int),
    ("long", ElementaryKind::Long),
    ("float", ElementaryKind::Float),
    ("double", ElementaryKind::Double),
    ("number", ElementaryKind::Number),
    ("decimal", ElementaryKind::Decimal),
    ("byte", ElementaryKind::Byte),
    ("short", ElementaryKind::Short),
    ("char", ElementaryKind::Char),
    ("character", ElementaryKind::Char),
    ("raw", ElementaryKind::Raw),
    ("bytes", ElementaryKind::Raw),
    ("timestamp", ElementaryKind::Timestamp),
    ("day", ElementaryKind::Day),
    ("uppercase", ElementaryKind::Uppercase),
    ("lowercase", ElementaryKind::Lowercase),
    ("ascii", ElementaryKind::Ascii),
    ("unicode", ElementaryKind::Unicode),
    ("string", ElementaryKind::String),
    ("enum", ElementaryKind::Enum),
];

/// Canonical names that may be emitted as a non-nullable primitive.
///
/// Compared case-sensitively: `Boolean` or `Integer` are boxed spellings.
const PRIMITIVE_CAPABLE: [&str; 8] = [
    "boolean", "int", "long", "float", "double", "byte", "short", "char",
];

impl ElementaryKind {
    /// The first table key denoting this kind.
    pub fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, kind)| *kind == self)
            .map_or("", |(key, _)| *key)
    }

    /// Case-insensitive table lookup of a canonical name.
    pub fn lookup(canonical: &str) -> Option<ElementaryKind> {
        TABLE
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(canonical))
            .map(|(_, kind)| *kind)
    }

    /// The target representation, or `None` for `enum`, whose
    /// representation is the referenced enumeration.
    pub fn representation(self) -> Option<Representation> {
        Some(match self {
            ElementaryKind::Boolean => Representation::Boolean,
            ElementaryKind::Int | ElementaryKind::Number => Representation::Integer,
            ElementaryKind::Long => Representation::Long,
            ElementaryKind::Float => Representation::Float,
            ElementaryKind::Double => Representation::Double,
            ElementaryKind::Decimal => Representation::BigDecimal,
            ElementaryKind::Byte => Representation::Byte,
            ElementaryKind::Short => Representation::Short,
            ElementaryKind::Char => Representation::Character,
            ElementaryKind::Raw => Representation::ByteArray,
            ElementaryKind::Timestamp | ElementaryKind::Day => Representation::Calendar,
            ElementaryKind::Uppercase
            | ElementaryKind::Lowercase
            | ElementaryKind::Ascii
            | ElementaryKind::Unicode
            | ElementaryKind::String => Representation::String,
            ElementaryKind::Enum => return None,
        })
    }

    /// The plausibility rule for the declared length and decimals.
    pub fn length_rule(self) -> LengthRule {
        match self {
            ElementaryKind::Timestamp => LengthRule::FractionalSeconds,
            ElementaryKind::Number => LengthRule::NumberMantissa,
            ElementaryKind::Decimal => LengthRule::DecimalMantissa,
            ElementaryKind::Raw
            | ElementaryKind::Uppercase
            | ElementaryKind::Lowercase
            | ElementaryKind::Ascii
            | ElementaryKind::Unicode
            | ElementaryKind::String => LengthRule::Size,
            ElementaryKind::Boolean
            | ElementaryKind::Int
            | ElementaryKind::Long
            | ElementaryKind::Float
            | ElementaryKind::Double
            | ElementaryKind::Byte
            | ElementaryKind::Short
            | ElementaryKind::Char
            | ElementaryKind::Day
            | ElementaryKind::Enum => LengthRule::Exempt,
        }
    }
}

impl fmt::Display for ElementaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a canonical name may use a primitive representation.
pub fn is_primitive_name(canonical: &str) -> bool {
    PRIMITIVE_CAPABLE.contains(&canonical)
}

/// Which length/precision bounds apply to an elementary type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LengthRule {
    /// No declared length.
    Exempt,
    /// `timestamp(n)`: 0..=3 fractional digits.
    FractionalSeconds,
    /// `number(n)`: 1..=9 digits.
    NumberMantissa,
    /// `decimal(n,d)`: 1..=18 digits, `d <= n`.
    DecimalMantissa,
    /// Strings and raw data: 1 byte up to 1 GiB.
    Size,
}

/// The representation a generator emits for an elementary type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Representation {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    BigDecimal,
    Byte,
    Short,
    Character,
    ByteArray,
    Calendar,
    String,
    /// An enumeration, by its declared name.
    Enum(String),
}

impl Representation {
    pub fn name(&self) -> &str {
        match self {
            Representation::Boolean => "Boolean",
            Representation::Integer => "Integer",
            Representation::Long => "Long",
            Representation::Float => "Float",
            Representation::Double => "Double",
            Representation::BigDecimal => "BigDecimal",
            Representation::Byte => "Byte",
            Representation::Short => "Short",
            Representation::Character => "Character",
            Representation::ByteArray => "byte []",
            Representation::Calendar => "GregorianCalendar",
            Representation::String => "String",
            Representation::Enum(name) => name,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
