//! Identifier storage for a model.
//!
//! The builder interns through `&self` while it holds mutable borrows of its
//! node tables, so the symbol table sits behind a lock.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

#[derive(Default)]
struct Symbols {
    by_text: FxHashMap<&'static str, Name>,
    texts: Vec<&'static str>,
}

impl Symbols {
    fn seeded() -> Self {
        let mut symbols = Symbols::default();
        symbols.by_text.insert("", Name::EMPTY);
        symbols.texts.push("");
        symbols
    }
}

/// Maps identifier text to [`Name`] handles and back.
///
/// Texts are leaked so that lookups can hand out `&'static str` without
/// holding the lock. One process builds a handful of models of a few hundred
/// identifiers each.
pub struct StringInterner {
    symbols: RwLock<Symbols>,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            symbols: RwLock::new(Symbols::seeded()),
        }
    }

    /// The handle for `text`, allocating one on first sight.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(name) = self.get(text) {
            return name;
        }
        let mut symbols = self.symbols.write();
        // Another writer may have won the race for the same text.
        if let Some(&name) = symbols.by_text.get(text) {
            return name;
        }
        let Ok(raw) = u32::try_from(symbols.texts.len()) else {
            panic!("more than u32::MAX identifiers interned");
        };
        let name = Name::from_raw(raw);
        let text: &'static str = Box::leak(text.to_owned().into_boxed_str());
        symbols.texts.push(text);
        symbols.by_text.insert(text, name);
        name
    }

    /// The handle for `text` if it was interned before.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.symbols.read().by_text.get(text).copied()
    }

    /// The text of a handle; empty for handles this interner never issued.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.symbols
            .read()
            .texts
            .get(name.index())
            .copied()
            .unwrap_or_default()
    }

    /// Number of distinct texts, the seeded empty string included.
    pub fn len(&self) -> usize {
        self.symbols.read().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StringInterner({} names)", self.len())
    }
}
