//! Attribute values looked up by composite rolls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A snapshot of a character's attribute values.
///
/// Keys are matched case-insensitively. A missing or empty key reads as 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: BTreeMap<String, i32>,
}

impl Attributes {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute value.
    pub fn with(mut self, key: impl Into<String>, value: i32) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace an attribute value.
    pub fn set(&mut self, key: impl Into<String>, value: i32) {
        let key = key.into();
        if let Some(existing) = self.find_key(&key) {
            self.values.insert(existing, value);
        } else {
            self.values.insert(key, value);
        }
    }

    /// Look up an attribute, returning 0 when absent.
    pub fn get(&self, key: &str) -> i32 {
        if key.is_empty() {
            return 0;
        }
        if let Some(value) = self.values.get(key) {
            return *value;
        }
        self.values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    /// Returns true if the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.find_key(key).is_some()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn find_key(&self, key: &str) -> Option<String> {
        self.values
            .keys()
            .find(|k| k.eq_ignore_ascii_case(key))
            .cloned()
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}
