//! Placeholder bindings.
//!
//! `Bindings` maps placeholder names to replacement text. Keys the template
//! never references are ignored at render time.
//!
//! Bindings can be read from YAML or JSON objects whose values are strings.
//! Values are read as text and never rebuilt from a parsed number (`1.10`
//! would become `1.1`). A value that cannot be read as a string, such as a
//! JSON number or a nested list, is rejected with the offending key named.

use crate::error::{Result, ScaffoldError};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A mapping from placeholder name to replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    /// Create an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Bind `name` only if it is not already bound.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse bindings from a YAML mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ScaffoldError::Config(format!("failed to parse bindings YAML: {}", e)))
    }

    /// Parse bindings from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ScaffoldError::Config(format!("failed to parse bindings JSON: {}", e)))
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Bindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> Extend<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

/// A binding value as read from YAML/JSON: strings only.
struct BindingValue(String);

impl<'de> Deserialize<'de> for BindingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = BindingValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string value; quote numbers, booleans and empty values")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(BindingValue(v.to_string()))
            }
        }

        deserializer.deserialize_str(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Bindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BindingsVisitor;

        impl<'de> Visitor<'de> for BindingsVisitor {
            type Value = Bindings;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from placeholder name to string value")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut bindings = Bindings::new();
                while let Some(name) = map.next_key::<String>()? {
                    let value: BindingValue = map.next_value().map_err(|e| {
                        <A::Error as de::Error>::custom(format!("binding '{}': {}", name, e))
                    })?;
                    bindings.insert(name, value.0);
                }
                Ok(bindings)
            }
        }

        deserializer.deserialize_map(BindingsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let bindings = Bindings::new().with("name", "Alice").with("id", "42");
        assert_eq!(bindings.get("name"), Some("Alice"));
        assert_eq!(bindings.get("id"), Some("42"));
        assert_eq!(bindings.get("missing"), None);
        assert_eq!(bindings.len(), 2);
        assert!(!bindings.is_empty());
    }

    #[test]
    fn test_insert_replaces() {
        let mut bindings = Bindings::from([("a", "1")]);
        assert_eq!(bindings.insert("a", "2"), Some("1".to_string()));
        assert_eq!(bindings.get("a"), Some("2"));
    }

    #[test]
    fn test_insert_if_absent_keeps_existing() {
        let mut bindings = Bindings::from([("a", "1")]);
        bindings.insert_if_absent("a", "2");
        bindings.insert_if_absent("b", "3");
        assert_eq!(bindings.get("a"), Some("1"));
        assert_eq!(bindings.get("b"), Some("3"));
    }

    #[test]
    fn test_extend() {
        let mut bindings = Bindings::from([("a", "1")]);
        bindings.extend([("b", "2"), ("a", "3")]);
        assert_eq!(bindings.get("a"), Some("3"));
        assert_eq!(bindings.get("b"), Some("2"));
    }

    #[test]
    fn test_from_yaml_strings() {
        let yaml = r#"
name: Alice
version: "1.10"
hex: "0x1F"
"#;
        let bindings = Bindings::from_yaml(yaml).unwrap();
        assert_eq!(bindings.get("name"), Some("Alice"));
        assert_eq!(bindings.get("version"), Some("1.10"));
        assert_eq!(bindings.get("hex"), Some("0x1F"));
    }

    #[test]
    fn test_from_yaml_never_rewrites_numbers() {
        // An unquoted number is either kept exactly as written or rejected
        // with the key named; it is never reformatted.
        match Bindings::from_yaml("version: 1.10") {
            Ok(bindings) => assert_eq!(bindings.get("version"), Some("1.10")),
            Err(err) => assert!(err.to_string().contains("binding 'version'")),
        }
    }

    #[test]
    fn test_from_json_rejects_number_naming_key() {
        let err = Bindings::from_json(r#"{"name": "x", "count": 3}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("binding 'count'"), "{}", msg);
        assert!(msg.contains("quote numbers"), "{}", msg);
    }

    #[test]
    fn test_from_json_rejects_null_naming_key() {
        let err = Bindings::from_json(r#"{"empty": null}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("binding 'empty'"), "{}", msg);
        assert!(msg.contains("a string value"), "{}", msg);
    }

    #[test]
    fn test_from_yaml_rejects_nested_values() {
        let err = Bindings::from_yaml("name: [a, b]").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to parse bindings YAML"), "{}", msg);
        assert!(msg.contains("binding 'name'"), "{}", msg);
    }

    #[test]
    fn test_from_json() {
        let bindings = Bindings::from_json(r#"{"package": "com.example", "count": "3"}"#).unwrap();
        assert_eq!(bindings.get("package"), Some("com.example"));
        assert_eq!(bindings.get("count"), Some("3"));
    }

    #[test]
    fn test_serialize_as_plain_map() {
        let bindings = Bindings::from([("a", "x")]);
        let json = serde_json::to_string(&bindings).unwrap();
        assert_eq!(json, r#"{"a":"x"}"#);
    }
}
