//! Naming canonicalization of elementary type names.
//!
//! bonScript accepts a capitalized spelling of an elementary type (`Int`,
//! `Boolean`, `String`) for the nullable, boxed form and a lower case one
//! (`int`, `boolean`, `string`) for the required, primitive form. Both must
//! hit the same table entry, while the original case is kept so the generator
//! can still choose between primitive and boxed output.

/// An elementary type name after canonicalization.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CanonicalName {
    pub name: String,
    /// The declared name started with an upper case letter.
    pub was_upper_case: bool,
}

/// Canonicalize a declared elementary type name.
///
/// Capitalized: `Int` becomes `Integer` and `Char` becomes `Character`.
/// Lower case: `integer` becomes `int` and `character` becomes `char`.
/// Every other name is kept as declared. Applying this to its own output
/// yields the same result.
pub fn canonicalize(declared: &str) -> CanonicalName {
    let was_upper_case = starts_upper_case(declared);
    let name = if was_upper_case {
        match declared {
            "Int" => "Integer",
            "Char" => "Character",
            other => other,
        }
    } else {
        match declared {
            "integer" => "int",
            "character" => "char",
            other => other,
        }
    };
    CanonicalName {
        name: name.to_owned(),
        was_upper_case,
    }
}

/// The first character is an upper case letter.
pub fn starts_upper_case(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// The first character is a lower case letter.
pub fn starts_lower_case(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_lowercase)
}

/// `name` with its first character upper-cased.
pub fn cap_initial(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `name` with its first character lower-cased.
pub fn uncap_initial(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
