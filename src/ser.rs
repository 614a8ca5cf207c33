//! Option serialization.
//!
//! This module provides the [`Serializer`] that turns option trees into a
//! JSON-compatible object literal for generated scripts, and the
//! [`JsValueSerializer`] that converts any `Serialize` type into a
//! [`JsValue`] tree.
//!
//! ## Overview
//!
//! Data is written exactly as a JSON encoder would write it. Code values are
//! written verbatim at their position in the output, so no placeholder ever
//! reaches the encoded text:
//!
//! - **Code**: [`JsCode`] values, and strings matched by the configured
//!   [`FunctionDetection`](crate::FunctionDetection), are emitted unquoted
//! - **Objects**: keys in insertion order, always quoted
//! - **Floats**: formatted by `serde_json`, so non-finite values become `null`
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use admin_text_field::{JsCode, JsOptions, Serializer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Mask {
//!     mask: &'static str,
//!     oncomplete: JsCode,
//! }
//!
//! let mut serializer = Serializer::new(JsOptions::new());
//! Mask { mask: "99/99", oncomplete: JsCode::new("function(){ next(); }") }
//!     .serialize(&mut serializer)
//!     .unwrap();
//!
//! assert_eq!(
//!     serializer.into_inner(),
//!     r#"{"mask":"99/99","oncomplete":function(){ next(); }}"#
//! );
//! ```

use crate::code::{self, JsCode};
use crate::value::format_date;
use crate::{Error, JsOptions, JsValue, Number, OptionMap, Result};
use serde::ser::Impossible;
use serde::{ser, Serialize};

/// The option serializer.
///
/// Writes into an in-memory buffer; created via [`Serializer::new`].
pub struct Serializer {
    output: String,
    options: JsOptions,
    indent_level: usize,
    raw_next: bool,
}

impl Serializer {
    pub fn new(options: JsOptions) -> Self {
        Serializer {
            output: String::with_capacity(128),
            options,
            indent_level: 0,
            raw_next: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a value tree. Infallible: keys are already strings.
    pub fn write_value(&mut self, value: &JsValue) {
        match value {
            JsValue::Null => self.output.push_str("null"),
            JsValue::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            JsValue::Number(Number::Integer(i)) => self.output.push_str(&i.to_string()),
            JsValue::Number(Number::Unsigned(u)) => self.output.push_str(&u.to_string()),
            JsValue::Number(Number::Float(f)) => self.write_f64(*f),
            JsValue::String(s) => self.write_data_str(s),
            JsValue::Array(arr) => {
                self.open('[');
                for (i, element) in arr.iter().enumerate() {
                    self.separate(i == 0);
                    self.write_value(element);
                }
                self.close(']', arr.is_empty());
            }
            JsValue::Object(obj) => self.write_object(obj),
            JsValue::Code(code) => self.output.push_str(code.as_str()),
            JsValue::Date(dt) => self.write_string(&format_date(dt)),
        }
    }

    /// Writes an options map as an object literal.
    pub fn write_object(&mut self, obj: &OptionMap) {
        self.open('{');
        for (i, (key, value)) in obj.iter().enumerate() {
            self.separate(i == 0);
            self.write_string(key);
            self.key_separator();
            self.write_value(value);
        }
        self.close('}', obj.is_empty());
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level * self.options.indent {
            self.output.push(' ');
        }
    }

    fn open(&mut self, ch: char) {
        self.output.push(ch);
        self.indent_level += 1;
    }

    fn separate(&mut self, first: bool) {
        if !first {
            self.output.push(',');
        }
        if self.options.pretty {
            self.output.push('\n');
            self.write_indent();
        }
    }

    fn close(&mut self, ch: char, empty: bool) {
        self.indent_level -= 1;
        if self.options.pretty && !empty {
            self.output.push('\n');
            self.write_indent();
        }
        self.output.push(ch);
    }

    fn key_separator(&mut self) {
        self.output.push(':');
        if self.options.pretty {
            self.output.push(' ');
        }
    }

    fn write_f64(&mut self, v: f64) {
        self.output.push_str(&format_f64(v));
    }

    /// A string in value position: code if the detection policy says so.
    fn write_data_str(&mut self, s: &str) {
        if self.options.detection.is_code(s) {
            tracing::trace!(len = s.len(), "string value matched function detection");
            self.output.push_str(s);
        } else {
            self.write_string(s);
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                '/' if self.options.escape_slashes => self.output.push_str("\\/"),
                c if (c as u32) < 0x20 => self.push_unicode_escape(c as u16),
                c if self.options.escape_unicode && !c.is_ascii() => {
                    let mut buf = [0u16; 2];
                    for unit in c.encode_utf16(&mut buf) {
                        self.push_unicode_escape(*unit);
                    }
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn push_unicode_escape(&mut self, unit: u16) {
        self.output.push_str(&format!("\\u{:04x}", unit));
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = SeqSerializer<'a>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = MapSerializer<'a>;
    type SerializeStructVariant = MapSerializer<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        let repr = serde_json::to_string(&v).map_err(Error::custom)?;
        self.output.push_str(&repr);
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write_f64(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.serialize_str(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        if std::mem::take(&mut self.raw_next) {
            self.output.push_str(v);
        } else {
            self.write_data_str(v);
        }
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str("null");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.write_string(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        if name == code::TOKEN {
            self.raw_next = true;
            let result = value.serialize(&mut *self);
            self.raw_next = false;
            return result;
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.open('{');
        self.separate(true);
        self.write_string(variant);
        self.key_separator();
        value.serialize(&mut *self)?;
        self.close('}', false);
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.open('[');
        Ok(SeqSerializer {
            ser: self,
            first: true,
            variant: false,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.open('{');
        self.separate(true);
        self.write_string(variant);
        self.key_separator();
        self.open('[');
        Ok(SeqSerializer {
            ser: self,
            first: true,
            variant: true,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.open('{');
        Ok(MapSerializer {
            ser: self,
            first: true,
            variant: false,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.open('{');
        self.separate(true);
        self.write_string(variant);
        self.key_separator();
        self.open('{');
        Ok(MapSerializer {
            ser: self,
            first: true,
            variant: true,
        })
    }
}

/// Writes array elements; also used for tuples and tuple variants.
pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    variant: bool,
}

impl SeqSerializer<'_> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.separate(self.first);
        self.first = false;
        value.serialize(&mut *self.ser)
    }

    fn finish(self) -> Result<()> {
        self.ser.close(']', self.first);
        if self.variant {
            self.ser.close('}', false);
        }
        Ok(())
    }
}

impl ser::SerializeSeq for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for SeqSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Writes object entries; also used for structs and struct variants.
pub struct MapSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
    variant: bool,
}

impl MapSerializer<'_> {
    fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.separate(self.first);
        self.first = false;
        self.ser.write_string(key);
        self.ser.key_separator();
        value.serialize(&mut *self.ser)
    }

    fn finish(self) -> Result<()> {
        self.ser.close('}', self.first);
        if self.variant {
            self.ser.close('}', false);
        }
        Ok(())
    }
}

impl ser::SerializeMap for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.separate(self.first);
        self.first = false;
        key.serialize(MapKeySerializer { ser: &mut *self.ser })?;
        self.ser.key_separator();
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStruct for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for MapSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Writes map keys. Keys are always quoted data, never code.
struct MapKeySerializer<'a> {
    ser: &'a mut Serializer,
}

impl MapKeySerializer<'_> {
    fn quoted(self, repr: &str) -> Result<()> {
        self.ser.write_string(repr);
        Ok(())
    }
}

impl ser::Serializer for MapKeySerializer<'_> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Impossible<(), Error>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.quoted(if v { "true" } else { "false" })
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.quoted(&v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::key_must_be_string("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::key_must_be_string("f64"))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.quoted(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.quoted(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::key_must_be_string("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::key_must_be_string("none"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::key_must_be_string("option"))
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::key_must_be_string("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        Err(Error::key_must_be_string(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.quoted(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::key_must_be_string(name))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::key_must_be_string("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::key_must_be_string("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::key_must_be_string(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::key_must_be_string(name))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::key_must_be_string("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::key_must_be_string(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::key_must_be_string(name))
    }
}

/// Converts any `Serialize` value into a [`JsValue`] tree.
///
/// [`JsCode`] fields become [`JsValue::Code`]; everything else becomes data.
pub struct JsValueSerializer;

pub struct SerializeVec {
    vec: Vec<JsValue>,
    variant: Option<String>,
}

pub struct SerializeMap {
    map: OptionMap,
    current_key: Option<String>,
    variant: Option<String>,
}

impl ser::Serializer for JsValueSerializer {
    type Ok = JsValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<JsValue> {
        Ok(JsValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<JsValue> {
        Ok(JsValue::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<JsValue> {
        Ok(JsValue::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<JsValue> {
        Ok(JsValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<JsValue> {
        Ok(JsValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<JsValue> {
        let vec = v
            .iter()
            .map(|&b| JsValue::Number(Number::Integer(b as i64)))
            .collect();
        Ok(JsValue::Array(vec))
    }

    fn serialize_none(self) -> Result<JsValue> {
        Ok(JsValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<JsValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<JsValue> {
        Ok(JsValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<JsValue> {
        Ok(JsValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<JsValue> {
        Ok(JsValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<JsValue>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(self)? {
            JsValue::String(source) if name == code::TOKEN => Ok(JsValue::Code(JsCode::new(source))),
            other => Ok(other),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<JsValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = OptionMap::with_capacity(1);
        map.insert(variant.to_string(), to_js_value(value)?);
        Ok(JsValue::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant.to_string())))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant.to_string())))
    }
}

fn wrap_variant(variant: Option<String>, value: JsValue) -> JsValue {
    match variant {
        Some(name) => {
            let mut map = OptionMap::with_capacity(1);
            map.insert(name, value);
            JsValue::Object(map)
        }
        None => value,
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<String>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn finish(self) -> JsValue {
        wrap_variant(self.variant, JsValue::Array(self.vec))
    }
}

impl SerializeMap {
    fn new(variant: Option<String>) -> Self {
        SerializeMap {
            map: OptionMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> JsValue {
        wrap_variant(self.variant, JsValue::Object(self.map))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_js_value(key)? {
            JsValue::String(s) => s,
            JsValue::Bool(b) => b.to_string(),
            JsValue::Number(Number::Integer(i)) => i.to_string(),
            JsValue::Number(Number::Unsigned(u)) => u.to_string(),
            other => return Err(Error::key_must_be_string(&format!("{:?}", other))),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = JsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_js_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsValue> {
        Ok(self.finish())
    }
}

/// Formats a float the way `serde_json` does. Non-finite values are `null`.
pub(crate) fn format_f64(v: f64) -> String {
    serde_json::to_string(&v).unwrap_or_else(|_| String::from("null"))
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value.serialize(JsValueSerializer)
}
