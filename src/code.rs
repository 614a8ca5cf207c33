//! Raw JavaScript fragments.
//!
//! [`JsCode`] marks a string as executable source rather than data. The
//! serializers in this crate write it verbatim; any other serde serializer
//! sees an ordinary string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Newtype-struct name used to smuggle code through the serde data model.
pub(crate) const TOKEN: &str = "$admin_text_field::private::JsCode";

/// A JavaScript source fragment emitted unquoted.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::{encode_value, JsCode, JsValue};
///
/// let code = JsCode::new("function(){ return 1; }");
/// assert_eq!(encode_value(&JsValue::from(code)), "function(){ return 1; }");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct JsCode(String);

impl JsCode {
    pub fn new(source: impl Into<String>) -> Self {
        JsCode(source.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for JsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JsCode {
    fn from(source: &str) -> Self {
        JsCode(source.to_string())
    }
}

impl From<String> for JsCode {
    fn from(source: String) -> Self {
        JsCode(source)
    }
}

impl AsRef<str> for JsCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for JsCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_newtype_struct(TOKEN, &self.0)
    }
}

impl<'de> Deserialize<'de> for JsCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(JsCode)
    }
}
