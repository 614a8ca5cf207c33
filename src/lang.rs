//! Localized strings used by form fields.
//!
//! Fields look up their user-facing text (placeholder prefix, validation
//! messages) through a [`Translator`]. [`Catalog`] is a simple in-memory
//! implementation seeded with English defaults.
//!
//! ```rust
//! use admin_text_field::{Catalog, Translator};
//!
//! let mut catalog = Catalog::english();
//! catalog.insert("admin.input", "Saisir");
//!
//! assert_eq!(catalog.trans("admin.input"), "Saisir");
//! assert_eq!(catalog.trans("admin.unknown"), "admin.unknown");
//! ```

use std::collections::HashMap;

/// Key for the placeholder prefix ("Input").
pub const INPUT: &str = "admin.input";

/// Key for the confirmation-mismatch message; `:attribute` is the field name.
pub const VALIDATION_MATCH: &str = "admin.validation.match";

/// Looks up localized text by key.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> Option<String>;

    /// Falls back to the key itself when there is no translation.
    fn trans(&self, key: &str) -> String {
        self.translate(key).unwrap_or_else(|| key.to_string())
    }
}

/// An in-memory translation table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// An empty catalog: every lookup falls back to the key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn english() -> Self {
        let mut catalog = Self::new();
        catalog.insert(INPUT, "Input");
        catalog.insert(VALIDATION_MATCH, "The :attribute does not match.");
        catalog
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), text.into());
        self
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_defaults() {
        let catalog = Catalog::english();
        assert_eq!(catalog.trans(INPUT), "Input");
        assert_eq!(
            catalog.trans(VALIDATION_MATCH),
            "The :attribute does not match."
        );
    }

    #[test]
    fn test_empty_catalog_falls_back_to_key() {
        assert_eq!(Catalog::new().trans(INPUT), INPUT);
    }
}
