//! Configuration options for option serialization.
//!
//! This module provides types to customize the encoded output:
//!
//! - [`JsOptions`]: Main configuration struct
//! - [`FunctionDetection`]: How string values are recognised as code
//!
//! ## Examples
//!
//! ```rust
//! use admin_text_field::{encode_with_options, jsopts, JsOptions};
//!
//! let options = jsopts!({ "url": "/api/lookup" });
//!
//! let compact = encode_with_options(&options, &JsOptions::new());
//! assert_eq!(compact, r#"{"url":"/api/lookup"}"#);
//!
//! let escaped = encode_with_options(&options, &JsOptions::new().with_escaped_slashes(true));
//! assert_eq!(escaped, r#"{"url":"\/api\/lookup"}"#);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Result};

/// Loose pattern used by older admin panels to spot callbacks in options.
pub const LEGACY_FUNCTION_PATTERN: &str = "function.*?";

static LEGACY_FUNCTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(LEGACY_FUNCTION_PATTERN).expect("legacy pattern compiles"));

/// Policy deciding which string values are emitted as code.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::FunctionDetection;
///
/// let legacy = FunctionDetection::legacy();
/// assert!(legacy.is_code("function(){}"));
/// assert!(legacy.is_code("no function here"));
/// assert!(!legacy.is_code("9999-9999"));
///
/// assert!(!FunctionDetection::Explicit.is_code("function(){}"));
/// ```
#[derive(Clone, Debug, Default)]
pub enum FunctionDetection {
    /// Only [`JsCode`](crate::JsCode) values are code.
    #[default]
    Explicit,
    /// Strings matching the pattern anywhere are code as well.
    Pattern(Regex),
}

impl FunctionDetection {
    /// The permissive `function.*?` match. Any string containing `function`
    /// is treated as code, including ordinary prose.
    #[must_use]
    pub fn legacy() -> Self {
        FunctionDetection::Pattern(LEGACY_FUNCTION_REGEX.clone())
    }

    /// Compiles a caller-supplied detection pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(FunctionDetection::Pattern)
            .map_err(|e| Error::invalid_pattern(pattern, &e.to_string()))
    }

    /// Returns `true` if a string value should be written as code.
    #[inline]
    #[must_use]
    pub fn is_code(&self, s: &str) -> bool {
        match self {
            FunctionDetection::Explicit => false,
            FunctionDetection::Pattern(re) => re.is_match(s),
        }
    }
}

/// Configuration options for option serialization.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::{FunctionDetection, JsOptions};
///
/// // Compact output, explicit code values only
/// let options = JsOptions::new();
///
/// // Pretty-printed with 4-space indentation
/// let options = JsOptions::pretty().with_indent(4);
///
/// // Byte-compatible with the classic PHP encoder plus callback sniffing
/// let options = JsOptions::legacy();
/// assert!(options.escape_slashes);
/// ```
#[derive(Clone, Debug)]
pub struct JsOptions {
    pub indent: usize,
    pub pretty: bool,
    pub escape_slashes: bool,
    pub escape_unicode: bool,
    pub detection: FunctionDetection,
}

impl Default for JsOptions {
    fn default() -> Self {
        JsOptions {
            indent: 2,
            pretty: false,
            escape_slashes: false,
            escape_unicode: false,
            detection: FunctionDetection::default(),
        }
    }
}

impl JsOptions {
    /// Creates default options (compact, no extra escaping, explicit code only).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::JsOptions;
    ///
    /// let options = JsOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with newlines and indentation.
    #[must_use]
    pub fn pretty() -> Self {
        JsOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Escaped slashes and unicode with loose callback detection.
    #[must_use]
    pub fn legacy() -> Self {
        JsOptions {
            escape_slashes: true,
            escape_unicode: true,
            detection: FunctionDetection::legacy(),
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Writes `/` as `\/` so the output can sit inside a `<script>` tag.
    #[must_use]
    pub fn with_escaped_slashes(mut self, escape: bool) -> Self {
        self.escape_slashes = escape;
        self
    }

    /// Writes every non-ASCII character as a `\uXXXX` escape.
    #[must_use]
    pub fn with_escaped_unicode(mut self, escape: bool) -> Self {
        self.escape_unicode = escape;
        self
    }

    #[must_use]
    pub fn with_function_detection(mut self, detection: FunctionDetection) -> Self {
        self.detection = detection;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_pattern_is_unanchored() {
        let detection = FunctionDetection::legacy();
        assert!(detection.is_code("  function (a, b) { return a + b; }"));
        assert!(detection.is_code("Call this function later"));
        assert!(!detection.is_code("Function"));
    }

    #[test]
    fn test_custom_pattern() {
        let detection = FunctionDetection::pattern(r"^\s*(function\b|\(.*\)\s*=>)").unwrap();
        assert!(detection.is_code("(v) => v.trim()"));
        assert!(detection.is_code("function(){}"));
        assert!(!detection.is_code("Call this function later"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FunctionDetection::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_legacy_preset() {
        let options = JsOptions::legacy();
        assert!(options.escape_slashes);
        assert!(options.escape_unicode);
        assert!(!options.pretty);
        assert!(options.detection.is_code("function(){}"));
    }
}
