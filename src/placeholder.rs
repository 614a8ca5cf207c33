//! Two-phase encoding through a foreign JSON encoder.
//!
//! Some callers must hand their options to an encoder they do not control
//! (a template engine's `json` filter, `serde_json`, a cache layer). For them,
//! [`prepare`] swaps every code value for a placeholder string, the foreign
//! encoder runs over the resulting plain-data tree, and
//! [`PreparedOptions::encode_with`] substitutes the quoted placeholders back
//! to raw source.
//!
//! Placeholders look like `%key%`, or `%key#n%` when a key repeats anywhere in
//! the tree or the plain marker would clash with existing text, so each one
//! occurs exactly once in the encoded output.
//!
//! ```rust
//! use admin_text_field::{jsopts, placeholder, JsCode};
//!
//! let options = jsopts!({
//!     "mask": "9999-9999",
//!     "onincomplete": (JsCode::new("function(){ clear(this); }"))
//! });
//!
//! let prepared = placeholder::prepare(&options);
//! let replacements: Vec<_> = prepared.replacements().collect();
//! assert_eq!(replacements, vec![("\"%onincomplete%\"", "function(){ clear(this); }")]);
//!
//! assert_eq!(
//!     prepared.encode(),
//!     r#"{"mask":"9999-9999","onincomplete":function(){ clear(this); }}"#
//! );
//! ```

use std::collections::HashMap;

use crate::{JsOptions, JsValue, OptionMap};

/// A code-free option tree plus its replacement table.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedOptions {
    tree: JsValue,
    to_replace: Vec<String>,
    original: Vec<String>,
}

/// Replaces code values with unique placeholders. The input is not modified.
#[must_use]
pub fn prepare(value: &JsValue) -> PreparedOptions {
    let mut reserved = Reserved::default();
    reserved.collect(value);

    let mut walk = Walk {
        reserved,
        seen: HashMap::new(),
        to_replace: Vec::new(),
        original: Vec::new(),
    };
    let tree = walk.value(value, "code");

    PreparedOptions {
        tree,
        to_replace: walk.to_replace,
        original: walk.original,
    }
}

impl PreparedOptions {
    /// The tree with placeholders standing in for code.
    #[must_use]
    pub fn tree(&self) -> &JsValue {
        &self.tree
    }

    /// Quoted placeholder and original source pairs, in traversal order.
    pub fn replacements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.to_replace
            .iter()
            .map(String::as_str)
            .zip(self.original.iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Encodes with this crate's encoder and default options.
    #[must_use]
    pub fn encode(&self) -> String {
        self.encode_with_options(&JsOptions::new())
    }

    #[must_use]
    pub fn encode_with_options(&self, options: &JsOptions) -> String {
        let encoded = crate::encode_with_options(&self.tree, options);
        self.substitute(encoded)
    }

    /// Runs `encode` over the placeholder tree, then puts the code back.
    ///
    /// # Errors
    ///
    /// Returns whatever error the encoder returns.
    pub fn encode_with<F, E>(&self, encode: F) -> Result<String, E>
    where
        F: FnOnce(&JsValue) -> Result<String, E>,
    {
        encode(&self.tree).map(|encoded| self.substitute(encoded))
    }

    /// Replaces each quoted placeholder with its source, in table order.
    #[must_use]
    pub fn substitute(&self, mut encoded: String) -> String {
        let mut substituted = 0usize;
        for (marker, source) in self.replacements() {
            match encoded.find(marker) {
                Some(pos) => {
                    encoded.replace_range(pos..pos + marker.len(), source);
                    substituted += 1;
                }
                None => tracing::warn!(marker, "placeholder missing from encoded output"),
            }
        }
        tracing::debug!(substituted, total = self.len(), "substituted code placeholders");
        encoded
    }
}

/// Text a placeholder must not appear in.
#[derive(Default)]
struct Reserved {
    text: Vec<String>,
}

impl Reserved {
    fn collect(&mut self, value: &JsValue) {
        match value {
            JsValue::String(s) => self.text.push(s.clone()),
            JsValue::Code(code) => self.text.push(code.as_str().to_string()),
            JsValue::Array(arr) => arr.iter().for_each(|v| self.collect(v)),
            JsValue::Object(obj) => {
                for (k, v) in obj.iter() {
                    self.text.push(k.clone());
                    self.collect(v);
                }
            }
            _ => {}
        }
    }

    /// Escaping never produces `%` or marker characters, so a marker that
    /// occurs in no key, string, or code text cannot occur in the encoding.
    fn is_free(&self, marker: &str) -> bool {
        !self.text.iter().any(|t| t.contains(marker))
    }
}

struct Walk {
    reserved: Reserved,
    seen: HashMap<String, usize>,
    to_replace: Vec<String>,
    original: Vec<String>,
}

impl Walk {
    fn value(&mut self, value: &JsValue, key: &str) -> JsValue {
        match value {
            JsValue::Code(code) => {
                let marker = self.marker(key);
                self.to_replace.push(format!("\"{}\"", marker));
                self.original.push(code.as_str().to_string());
                JsValue::String(marker)
            }
            JsValue::Array(arr) => JsValue::Array(
                arr.iter()
                    .enumerate()
                    .map(|(i, v)| self.value(v, &i.to_string()))
                    .collect(),
            ),
            JsValue::Object(obj) => JsValue::Object(self.object(obj)),
            other => other.clone(),
        }
    }

    fn object(&mut self, obj: &OptionMap) -> OptionMap {
        obj.iter()
            .map(|(k, v)| (k.clone(), self.value(v, k)))
            .collect()
    }

    fn marker(&mut self, key: &str) -> String {
        let base: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let n = self.seen.entry(base.clone()).or_insert(0);
        loop {
            let marker = if *n == 0 {
                format!("%{}%", base)
            } else {
                format!("%{}#{}%", base, n)
            };
            *n += 1;
            if self.reserved.is_free(&marker) {
                return marker;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JsCode;

    fn code_map(entries: &[(&str, JsValue)]) -> JsValue {
        JsValue::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_repeated_keys_get_distinct_markers() {
        let inner = code_map(&[("cb", JsValue::code("function(){ return 2; }"))]);
        let value = code_map(&[
            ("cb", JsValue::code("function(){ return 1; }")),
            ("nested", inner),
        ]);

        let prepared = prepare(&value);
        let markers: Vec<_> = prepared.replacements().map(|(m, _)| m).collect();
        assert_eq!(markers, vec!["\"%cb%\"", "\"%cb#1%\""]);
        assert_eq!(
            prepared.encode(),
            r#"{"cb":function(){ return 1; },"nested":{"cb":function(){ return 2; }}}"#
        );
    }

    #[test]
    fn test_marker_avoids_existing_data() {
        let value = code_map(&[
            ("note", JsValue::from("%cb%")),
            ("cb", JsValue::code("function(){}")),
        ]);

        let prepared = prepare(&value);
        assert_eq!(
            prepared.encode(),
            r#"{"note":"%cb%","cb":function(){}}"#
        );
    }

    #[test]
    fn test_marker_avoids_strings_containing_it() {
        let value = code_map(&[
            ("note", JsValue::from("\"%cb%")),
            ("tail", JsValue::from("see %cb#1%\" here")),
            ("cb", JsValue::code("function(){}")),
        ]);

        let prepared = prepare(&value);
        let markers: Vec<_> = prepared.replacements().map(|(m, _)| m).collect();
        assert_eq!(markers, vec!["\"%cb#2%\""]);

        let expected = r#"{"note":"\"%cb%","tail":"see %cb#1%\" here","cb":function(){}}"#;
        assert_eq!(prepared.encode(), expected);
        assert_eq!(crate::encode_value(&value), expected);
    }

    #[test]
    fn test_marker_avoids_keys_containing_it() {
        let value = code_map(&[
            ("x%cb%", JsValue::from(1)),
            ("cb", JsValue::code("function(){}")),
        ]);

        let prepared = prepare(&value);
        assert_eq!(
            prepared.encode_with(serde_json::to_string).unwrap(),
            r#"{"x%cb%":1,"cb":function(){}}"#
        );
    }

    #[test]
    fn test_marker_avoids_code_text() {
        let value = code_map(&[
            ("a", JsValue::code("function(){ return \"%b%\"; }")),
            ("b", JsValue::code("function(){}")),
        ]);

        let prepared = prepare(&value);
        assert_eq!(
            prepared.encode(),
            r#"{"a":function(){ return "%b%"; },"b":function(){}}"#
        );
    }

    #[test]
    fn test_array_elements_use_index_keys() {
        let value = JsValue::Array(vec![JsValue::from(1), JsValue::from(JsCode::new("f"))]);
        let prepared = prepare(&value);
        let markers: Vec<_> = prepared.replacements().map(|(m, _)| m).collect();
        assert_eq!(markers, vec!["\"%1%\""]);
        assert_eq!(prepared.encode(), "[1,f]");
    }

    #[test]
    fn test_empty_tree_has_no_replacements() {
        let prepared = prepare(&JsValue::Object(OptionMap::new()));
        assert!(prepared.is_empty());
        assert_eq!(prepared.encode(), "{}");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let value = code_map(&[("cb", JsValue::code("function(){}"))]);
        let before = value.clone();
        let _ = prepare(&value);
        assert_eq!(value, before);
    }
}
