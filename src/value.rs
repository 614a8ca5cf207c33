//! Dynamic value representation for plugin options.
//!
//! [`JsValue`] is the tagged tree handed to the option serializer. Code and
//! data are distinguished by construction: a callback is a
//! [`JsValue::Code`], everything else is data and is encoded as such.
//!
//! ## Creating Values
//!
//! ```rust
//! use admin_text_field::{jsopts, JsCode, JsValue};
//!
//! let mask = JsValue::from("9999-9999");
//! let callback = JsValue::from(JsCode::new("function(){ clear(this); }"));
//! assert!(mask.is_string());
//! assert!(callback.is_code());
//!
//! let options = jsopts!({
//!     "mask": "9999-9999",
//!     "oncomplete": (JsCode::new("function(){ done(); }"))
//! });
//! assert!(options.is_object());
//! ```
//!
//! ## Classifying Loaded Options
//!
//! Options read from a config file arrive as plain strings. [`JsValue::classify`]
//! promotes the ones matching a detection policy to code:
//!
//! ```rust
//! use admin_text_field::{FunctionDetection, JsValue};
//!
//! let loaded = JsValue::from("function(v){ return v; }");
//! let classified = loaded.classify(&FunctionDetection::legacy());
//! assert!(classified.is_code());
//! ```

use crate::code::{self, JsCode};
use crate::{FunctionDetection, OptionMap};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed option value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsValue>),
    Object(OptionMap),
    Code(JsCode),
    Date(DateTime<Utc>),
}

/// A numeric option value.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::Number;
///
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
/// assert_eq!(Number::Float(0.5).as_f64(), 0.5);
/// assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    /// Only holds values above `i64::MAX`; smaller ones are `Integer`.
    Unsigned(u64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Unsigned(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Unsigned(_) => None,
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Unsigned(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Number::Integer(i),
            Err(_) => Number::Unsigned(value),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => f.write_str(&crate::ser::format_f64(*fl)),
        }
    }
}

impl JsValue {
    /// Builds a code value from source text.
    pub fn code(source: impl Into<String>) -> Self {
        JsValue::Code(JsCode::new(source))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, JsValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsValue::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_code(&self) -> bool {
        matches!(self, JsValue::Code(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, JsValue::Date(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Code is not a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::JsValue;
    ///
    /// assert_eq!(JsValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(JsValue::code("function(){}").as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<JsValue>> {
        match self {
            JsValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&OptionMap> {
        match self {
            JsValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_code(&self) -> Option<&JsCode> {
        match self {
            JsValue::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Returns a copy of this tree where every string the policy recognises
    /// is turned into code. Object keys are never inspected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::{jsopts, FunctionDetection};
    ///
    /// let loaded = jsopts!({
    ///     "mask": "9999",
    ///     "group": { "validator": "function(v){ return !!v; }" }
    /// });
    /// let tagged = loaded.classify(&FunctionDetection::legacy());
    ///
    /// let group = tagged.as_object().and_then(|o| o.get("group")).and_then(|g| g.as_object());
    /// assert!(group.and_then(|g| g.get("validator")).map_or(false, |v| v.is_code()));
    /// assert!(loaded.as_object().and_then(|o| o.get("mask")).map_or(false, |v| v.is_string()));
    /// ```
    #[must_use]
    pub fn classify(&self, detection: &FunctionDetection) -> JsValue {
        match self {
            JsValue::String(s) if detection.is_code(s) => JsValue::code(s.clone()),
            JsValue::Array(arr) => {
                JsValue::Array(arr.iter().map(|v| v.classify(detection)).collect())
            }
            JsValue::Object(obj) => JsValue::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.classify(detection)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

impl fmt::Display for JsValue {
    /// Writes the compact encoding, code included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode_value(self))
    }
}

pub(crate) fn format_date(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl Serialize for JsValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsValue::Null => serializer.serialize_unit(),
            JsValue::Bool(b) => serializer.serialize_bool(*b),
            JsValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            JsValue::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            JsValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            JsValue::String(s) => serializer.serialize_str(s),
            JsValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            JsValue::Code(code) => serializer.serialize_newtype_struct(code::TOKEN, code.as_str()),
            JsValue::Date(dt) => serializer.serialize_str(&format_date(dt)),
        }
    }
}

impl<'de> Deserialize<'de> for JsValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct JsValueVisitor;

        impl<'de> Visitor<'de> for JsValueVisitor {
            type Value = JsValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any option value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(JsValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(JsValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(JsValue::Number(Number::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(JsValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(JsValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(JsValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(JsValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(JsValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(JsValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = OptionMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(JsValue::Object(values))
            }
        }

        deserializer.deserialize_any(JsValueVisitor)
    }
}

impl TryFrom<JsValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: JsValue) -> crate::Result<Self> {
        match value {
            JsValue::Number(n) => n
                .as_i64()
                .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", n))),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<JsValue> for bool {
    type Error = crate::Error;

    fn try_from(value: JsValue) -> crate::Result<Self> {
        match value {
            JsValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<JsValue> for String {
    type Error = crate::Error;

    fn try_from(value: JsValue) -> crate::Result<Self> {
        match value {
            JsValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        JsValue::Bool(value)
    }
}

impl From<i32> for JsValue {
    fn from(value: i32) -> Self {
        JsValue::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for JsValue {
    fn from(value: i64) -> Self {
        JsValue::Number(Number::Integer(value))
    }
}

impl From<u8> for JsValue {
    fn from(value: u8) -> Self {
        JsValue::Number(Number::Integer(value as i64))
    }
}

impl From<u16> for JsValue {
    fn from(value: u16) -> Self {
        JsValue::Number(Number::Integer(value as i64))
    }
}

impl From<u32> for JsValue {
    fn from(value: u32) -> Self {
        JsValue::Number(Number::Integer(value as i64))
    }
}

impl From<u64> for JsValue {
    fn from(value: u64) -> Self {
        JsValue::Number(Number::from(value))
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        JsValue::Number(Number::Float(value))
    }
}

impl From<String> for JsValue {
    fn from(value: String) -> Self {
        JsValue::String(value)
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        JsValue::String(value.to_string())
    }
}

impl From<JsCode> for JsValue {
    fn from(value: JsCode) -> Self {
        JsValue::Code(value)
    }
}

impl From<DateTime<Utc>> for JsValue {
    fn from(value: DateTime<Utc>) -> Self {
        JsValue::Date(value)
    }
}

impl From<Vec<JsValue>> for JsValue {
    fn from(value: Vec<JsValue>) -> Self {
        JsValue::Array(value)
    }
}

impl From<OptionMap> for JsValue {
    fn from(value: OptionMap) -> Self {
        JsValue::Object(value)
    }
}

impl<T: Into<JsValue>> From<Option<T>> for JsValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tryfrom_i64() {
        let value = JsValue::Number(Number::Float(42.0));
        assert_eq!(i64::try_from(value).unwrap(), 42);

        let value = JsValue::Number(Number::Float(42.5));
        assert!(i64::try_from(value).is_err());

        assert!(i64::try_from(JsValue::code("function(){}")).is_err());
    }

    #[test]
    fn test_unsigned_above_i64_range() {
        assert_eq!(Number::from(7u64), Number::Integer(7));
        assert_eq!(Number::from(u64::MAX), Number::Unsigned(u64::MAX));
        assert!(Number::from(u64::MAX).is_integer());
        assert_eq!(JsValue::from(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_float_display_matches_json() {
        assert_eq!(Number::Float(1e20).to_string(), serde_json::to_string(&1e20).unwrap());
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
        assert_eq!(Number::Float(f64::NAN).to_string(), "null");
    }

    #[test]
    fn test_tryfrom_string_rejects_code() {
        assert_eq!(String::try_from(JsValue::from("x")).unwrap(), "x");
        assert!(String::try_from(JsValue::code("function(){}")).is_err());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(JsValue::from(None::<i32>), JsValue::Null);
        assert_eq!(JsValue::from(Some("a")), JsValue::String("a".to_string()));
    }

    #[test]
    fn test_classify_leaves_input_untouched() {
        let mut inner = OptionMap::new();
        inner.insert("cb".to_string(), JsValue::from("function(){}"));
        let value = JsValue::Array(vec![JsValue::from("function(){}"), JsValue::Object(inner)]);

        let classified = value.classify(&FunctionDetection::legacy());
        let arr = classified.as_array().unwrap();
        assert!(arr[0].is_code());
        assert!(arr[1].as_object().unwrap().get("cb").unwrap().is_code());

        assert!(value.as_array().unwrap()[0].is_string());
    }

    #[test]
    fn test_classify_explicit_is_identity() {
        let value = JsValue::from("function(){}");
        assert_eq!(value.classify(&FunctionDetection::Explicit), value);
    }

    #[test]
    fn test_date_serializes_as_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let json = serde_json::to_string(&JsValue::Date(dt)).unwrap();
        assert_eq!(json, "\"2024-01-15T10:30:00Z\"");
    }

    #[test]
    fn test_deserialize_from_json() {
        let value: JsValue = serde_json::from_str(r#"{"a":[1,2.5,null],"b":"x"}"#).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<_> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            obj.get("a"),
            Some(&JsValue::Array(vec![
                JsValue::from(1),
                JsValue::from(2.5),
                JsValue::Null
            ]))
        );
    }
}
