//! Identifier derivation for generated code.

use gooptions_schema::types::{BYTE_ALIAS, RUNE_ALIAS};
use std::collections::HashSet;

/// Go keywords.
pub const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Names that would read as the alias types when used as parameters.
pub const DENY_LIST: &[&str] = &[BYTE_ALIAS, RUNE_ALIAS];

/// Returns true if `name` is a Go keyword.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Upper-cases the first character: `email` -> `Email`.
#[must_use]
pub fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character: `CreatedBy` -> `createdBy`.
#[must_use]
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the receiver name for a type: its lower-cased first character.
#[must_use]
pub fn receiver_name(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}

/// Disambiguates parameter names for one generation run.
///
/// Colliding names get a numeric suffix from a counter owned by the
/// sanitizer, so two runs over the same record produce the same names.
#[derive(Debug, Clone, Default)]
pub struct NameSanitizer {
    counter: usize,
    reserved: HashSet<String>,
}

impl NameSanitizer {
    /// Creates a sanitizer with a fresh counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves an additional identifier, such as the receiver name.
    #[must_use]
    pub fn reserve(mut self, name: impl Into<String>) -> Self {
        self.reserved.insert(name.into());
        self
    }

    /// Returns true if `name` cannot be used as-is.
    #[must_use]
    pub fn collides(&self, name: &str) -> bool {
        is_keyword(name) || DENY_LIST.contains(&name) || self.reserved.contains(name)
    }

    /// Returns `name`, or `name` followed by the next counter value if it
    /// collides.
    pub fn sanitize(&mut self, name: &str) -> String {
        if !self.collides(name) {
            return name.to_string();
        }
        let result = format!("{}{}", name, self.counter);
        self.counter += 1;
        result
    }

    /// Derives the parameter name for a field: `lower_first` then `sanitize`.
    pub fn argument_name(&mut self, field_name: &str) -> String {
        self.sanitize(&lower_first(field_name))
    }
}
