//! Form fields rendered as HTML.
//!
//! [`Attributes`] is the ordered attribute bag shared by fields;
//! [`TextField`] is the `<input>`-based text field.

mod text;

pub use text::TextField;

use indexmap::IndexMap;

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// HTML attributes in insertion order.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::Attributes;
///
/// let mut attrs = Attributes::new();
/// attrs.set("type", "email");
/// attrs.set_default("type", "text");
/// attrs.set_default("id", "email");
///
/// assert_eq!(attrs.render(), r#"type="email" id="email""#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Sets an attribute only if it is not already present.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Formats the attributes as `name="value"` pairs separated by spaces.
    #[must_use]
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!(r#"{}="{}""#, escape_html(k), escape_html(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
