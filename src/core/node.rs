//! Configuration tree model.
//!
//! A `ConfigNode` is what an external loader hands us: scalars, sequences and
//! mappings nested to any depth. Any serde format can produce one, so
//! `serde_json::from_str::<ConfigNode>` and `toml::from_str::<ConfigNode>`
//! both work out of the box.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Leaf value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// A node in a parsed configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    Scalar(Scalar),
    Sequence(Vec<ConfigNode>),
    Mapping(Mapping),
}

impl ConfigNode {
    /// Build a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Borrow the string if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Borrow the mapping if this node is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Short type name for log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(Scalar::Null) => "null",
            Self::Scalar(Scalar::Bool(_)) => "bool",
            Self::Scalar(Scalar::Number(_)) => "number",
            Self::Scalar(Scalar::String(_)) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<Mapping> for ConfigNode {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(value: Vec<ConfigNode>) -> Self {
        Self::Sequence(value)
    }
}

/// String-keyed mapping that keeps insertion order.
///
/// Inserting an existing key replaces its value in place. Lookups and
/// inserts go through a key index, so building a mapping is linear in its
/// size.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, ConfigNode)>,
    index: HashMap<String, usize>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous one for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigNode) -> Option<ConfigNode> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

// Equality is over the ordered entries; the index is derived from them.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<String>> FromIterator<(K, ConfigNode)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, ConfigNode)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = Mapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string-keyed mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Mapping, A::Error> {
                let mut mapping = Mapping::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, ConfigNode>()? {
                    mapping.insert(key, value);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_preserves_key_order() {
        let node: ConfigNode = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = node.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"z":1,"a":2,"m":3}"#
        );
    }

    #[test]
    fn test_json_scalars() {
        let node: ConfigNode =
            serde_json::from_str(r#"[null, true, 3, -4, 1.5, "s"]"#).unwrap();
        let ConfigNode::Sequence(items) = node else {
            panic!("expected sequence");
        };
        let kinds: Vec<_> = items.iter().map(ConfigNode::kind).collect();
        assert_eq!(
            kinds,
            ["null", "bool", "number", "number", "number", "string"]
        );
    }

    #[test]
    fn test_toml_document() {
        let node: ConfigNode = toml::from_str(
            r#"
            db = "db.example"
            [secrets]
            password = { _kms = "AQID" }
            "#,
        )
        .unwrap();
        let root = node.as_mapping().unwrap();
        assert_eq!(root.get("db").and_then(ConfigNode::as_str), Some("db.example"));
        let marker = root
            .get("secrets")
            .and_then(ConfigNode::as_mapping)
            .and_then(|m| m.get("password"))
            .and_then(ConfigNode::as_mapping)
            .unwrap();
        assert_eq!(marker.get("_kms").and_then(ConfigNode::as_str), Some("AQID"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut m = Mapping::new();
        m.insert("a", "1".into());
        m.insert("b", "2".into());
        let old = m.insert("a", "3".into());
        assert_eq!(old, Some(ConfigNode::string("1")));
        let pairs: Vec<_> = m.iter().map(|(k, v)| (k, v.as_str().unwrap())).collect();
        assert_eq!(pairs, [("a", "3"), ("b", "2")]);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_wide_mapping_lookup() {
        let m: Mapping = (0..5000)
            .map(|i| (format!("key{}", i), ConfigNode::string(i.to_string())))
            .collect();
        assert_eq!(m.len(), 5000);
        assert_eq!(m.get("key4321").and_then(ConfigNode::as_str), Some("4321"));
        assert!(!m.contains_key("key5000"));
        let keys: Vec<_> = m.keys().take(3).collect();
        assert_eq!(keys, ["key0", "key1", "key2"]);
    }

    #[test]
    fn test_duplicate_json_keys_keep_first_position() {
        let node: ConfigNode = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"a":3,"b":2}"#);
    }
}
