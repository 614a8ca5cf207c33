//! Ordered map type for option objects.
//!
//! This module provides [`OptionMap`], a wrapper around [`IndexMap`] that keeps
//! keys in insertion order. Plugin options are written in exactly the order
//! the caller built them, so two encodings of the same map are byte-identical.
//!
//! ## Examples
//!
//! ```rust
//! use admin_text_field::{OptionMap, JsValue};
//!
//! let mut map = OptionMap::new();
//! map.insert("mask".to_string(), JsValue::from("9999-9999"));
//! map.insert("greedy".to_string(), JsValue::from(false));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("mask").and_then(|v| v.as_str()), Some("9999-9999"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::JsValue;

/// An ordered map of string keys to option values.
///
/// # Examples
///
/// ```rust
/// use admin_text_field::{OptionMap, JsValue};
///
/// let mut map = OptionMap::new();
/// map.insert("first".to_string(), JsValue::from(1));
/// map.insert("second".to_string(), JsValue::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionMap(IndexMap<String, JsValue>);

impl OptionMap {
    /// Creates an empty `OptionMap`.
    #[must_use]
    pub fn new() -> Self {
        OptionMap(IndexMap::new())
    }

    /// Creates an empty `OptionMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OptionMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_text_field::{OptionMap, JsValue};
    ///
    /// let mut map = OptionMap::new();
    /// assert!(map.insert("key".to_string(), JsValue::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), JsValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: JsValue) -> Option<JsValue> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsValue> {
        self.0.get_mut(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<JsValue> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, JsValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, JsValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsValue> {
        self.0.iter()
    }
}

impl Default for OptionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<IndexMap<String, JsValue>> for OptionMap {
    fn from(map: IndexMap<String, JsValue>) -> Self {
        OptionMap(map)
    }
}

impl From<HashMap<String, JsValue>> for OptionMap {
    fn from(map: HashMap<String, JsValue>) -> Self {
        OptionMap(map.into_iter().collect())
    }
}

impl IntoIterator for OptionMap {
    type Item = (String, JsValue);
    type IntoIter = indexmap::map::IntoIter<String, JsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OptionMap {
    type Item = (&'a String, &'a JsValue);
    type IntoIter = indexmap::map::Iter<'a, String, JsValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, JsValue)> for OptionMap {
    fn from_iter<T: IntoIterator<Item = (String, JsValue)>>(iter: T) -> Self {
        OptionMap(IndexMap::from_iter(iter))
    }
}
