//! # admin_text_field
//!
//! A text input field for server-rendered admin panels, and the option
//! serializer it uses to configure client-side plugins.
//!
//! ## Why a custom serializer?
//!
//! Client-side plugins such as Inputmask take configuration objects whose
//! values are sometimes callbacks. JSON has no way to express a function, so
//! a plain JSON encoder quotes the callback and the plugin receives a string.
//! This crate writes data exactly like JSON but emits [`JsCode`] values raw, so
//! the result can be spliced into a generated script as an object literal.
//!
//! ## Quick Start
//!
//! ```rust
//! use admin_text_field::{encode_value, jsopts, JsCode};
//!
//! let options = jsopts!({
//!     "mask": "9999-9999",
//!     "onincomplete": (JsCode::new("function(){ clear(this); }"))
//! });
//!
//! assert_eq!(
//!     encode_value(&options),
//!     r#"{"mask":"9999-9999","onincomplete":function(){ clear(this); }}"#
//! );
//! ```
//!
//! ### Serde Types
//!
//! Any `T: Serialize` can be encoded; fields of type [`JsCode`] come out raw.
//!
//! ```rust
//! use admin_text_field::{to_string, JsCode};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Validator {
//!     validator: JsCode,
//! }
//!
//! #[derive(Serialize)]
//! struct Options {
//!     group: Validator,
//! }
//!
//! let options = Options {
//!     group: Validator { validator: JsCode::new("function(v){return v.length>0;}") },
//! };
//! assert_eq!(
//!     to_string(&options).unwrap(),
//!     r#"{"group":{"validator":function(v){return v.length>0;}}}"#
//! );
//! ```
//!
//! ### The Text Field
//!
//! ```rust
//! use admin_text_field::{jsopts, TextField};
//!
//! let mut field = TextField::new("phone", "Phone");
//! field.inputmask(&jsopts!({ "mask": "999-9999" }));
//!
//! let html = field.render();
//! assert!(html.contains(r#"name="phone""#));
//! assert!(html.contains(r#"$('.field_phone').inputmask({"mask":"999-9999"});"#));
//! ```
//!
//! ## Legacy Callback Detection
//!
//! Older admin panels decided what was a callback by looking for the word
//! `function` in any string. That behaviour is available through
//! [`JsOptions::legacy`] / [`FunctionDetection::legacy`], with the same false
//! positives: any string containing `function` is emitted as code.

pub mod code;
pub mod error;
pub mod field;
pub mod lang;
pub mod macros;
pub mod map;
pub mod options;
pub mod placeholder;
pub mod ser;
pub mod value;

pub use code::JsCode;
pub use error::{Error, Result};
pub use field::{Attributes, TextField};
pub use lang::{Catalog, Translator};
pub use map::OptionMap;
pub use options::{FunctionDetection, JsOptions};
pub use placeholder::PreparedOptions;
pub use ser::{JsValueSerializer, Serializer};
pub use value::{JsValue, Number};

use serde::Serialize;
use std::io;

/// Encodes an options map with default options.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::{encode, OptionMap};
///
/// assert_eq!(encode(&OptionMap::new()), "{}");
/// ```
#[must_use]
pub fn encode(options: &OptionMap) -> String {
    let mut serializer = Serializer::new(JsOptions::default());
    serializer.write_object(options);
    serializer.into_inner()
}

/// Encodes any value tree with default options.
#[must_use]
pub fn encode_value(value: &JsValue) -> String {
    encode_with_options(value, &JsOptions::default())
}

/// Encodes a value tree with custom options.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::{encode_with_options, jsopts, JsOptions};
///
/// let options = jsopts!({
///     "mask": "99.99",
///     "oncomplete": "function(){ next(); }"
/// });
///
/// assert_eq!(
///     encode_with_options(&options, &JsOptions::legacy()),
///     r#"{"mask":"99.99","oncomplete":function(){ next(); }}"#
/// );
/// ```
#[must_use]
pub fn encode_with_options(value: &JsValue, options: &JsOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_value(value);
    serializer.into_inner()
}

/// Serialize any `T: Serialize` to an object-literal string.
///
/// # Errors
///
/// Returns an error if a map key is not a string-like value or the value's
/// `Serialize` impl fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed string.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, JsOptions::pretty())
}

/// Serialize any `T: Serialize` with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: JsOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`JsValue`].
///
/// # Examples
///
/// ```rust
/// use admin_text_field::{to_value, JsCode};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Hooks { oncomplete: JsCode }
///
/// let value = to_value(&Hooks { oncomplete: JsCode::new("function(){}") }).unwrap();
/// assert!(value.as_object().unwrap().get("oncomplete").unwrap().is_code());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<JsValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(JsValueSerializer)
}

/// Serialize any `T: Serialize` to a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, JsOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: JsOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let encoded = to_string_with_options(value, options)?;
    writer
        .write_all(encoded.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Mask {
        mask: String,
        greedy: bool,
        repeat: Option<u32>,
        onincomplete: JsCode,
    }

    #[derive(Serialize)]
    enum Placement {
        Top,
        Offset(i32),
        Point { x: i32, y: i32 },
        Pair(u8, u8),
    }

    #[test]
    fn test_struct_with_code() {
        let mask = Mask {
            mask: "9999-9999".to_string(),
            greedy: false,
            repeat: None,
            onincomplete: JsCode::new("function(){ clear(this); }"),
        };
        assert_eq!(
            to_string(&mask).unwrap(),
            r#"{"mask":"9999-9999","greedy":false,"repeat":null,"onincomplete":function(){ clear(this); }}"#
        );
    }

    #[test]
    fn test_enum_variants_match_json() {
        let values = vec![
            Placement::Top,
            Placement::Offset(-3),
            Placement::Point { x: 1, y: 2 },
            Placement::Pair(4, 5),
        ];
        assert_eq!(
            to_string(&values).unwrap(),
            serde_json::to_string(&values).unwrap()
        );
    }

    #[test]
    fn test_enum_variants_pretty_match_json() {
        let values = vec![Placement::Offset(1), Placement::Point { x: 1, y: 2 }];
        assert_eq!(
            to_string_pretty(&values).unwrap(),
            serde_json::to_string_pretty(&values).unwrap()
        );
    }

    #[test]
    fn test_integer_keys_are_quoted() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        assert_eq!(to_string(&map).unwrap(), r#"{"1":"one","2":"two"}"#);
    }

    #[test]
    fn test_sequence_key_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert(vec![1], "one");
        assert!(matches!(to_string(&map), Err(Error::KeyMustBeString(_))));
    }

    #[test]
    fn test_to_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &JsValue::code("function(){}")).unwrap();
        assert_eq!(buffer, b"function(){}");
    }

    #[test]
    fn test_to_value_then_encode_matches_direct() {
        let mask = Mask {
            mask: "a/b".to_string(),
            greedy: true,
            repeat: Some(3),
            onincomplete: JsCode::new("function(){}"),
        };
        let value = to_value(&mask).unwrap();
        assert_eq!(encode_value(&value), to_string(&mask).unwrap());
    }

    #[test]
    fn test_encode_map_equals_encode_value() {
        let mut map = OptionMap::new();
        map.insert("x".to_string(), JsValue::from(1));
        assert_eq!(encode(&map), encode_value(&JsValue::Object(map.clone())));
    }
}
