// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat key-value content of a configuration section.

use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The content of one configuration section.
///
/// A section is a flat mapping from lowercase string keys to string values.
/// Keys are lowercased on insertion, so the invariant holds no matter where the
/// values come from (disk, environment or an autoconfig payload).
///
/// # Examples
///
/// ```
/// use stups_config::domain::Section;
///
/// let mut section = Section::new();
/// section.insert("Domain", "stups.example.org");
///
/// assert_eq!(section.get("domain"), Some("stups.example.org"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Section(BTreeMap<String, String>);

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, lowercasing the key. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.as_ref().to_lowercase(), value.into())
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Returns true if the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Overlays every entry of `other` onto this section, replacing existing values.
    pub fn merge(&mut self, other: Section) {
        self.0.extend(other.0);
    }

    /// Converts the section into a YAML mapping of string values, in key order.
    pub fn to_mapping(&self) -> serde_yaml::Mapping {
        self.0
            .iter()
            .map(|(k, v)| {
                (
                    serde_yaml::Value::String(k.clone()),
                    serde_yaml::Value::String(v.clone()),
                )
            })
            .collect()
    }

    /// Builds a section from a parsed YAML document.
    ///
    /// Nested mappings and sequences are flattened using dot notation, scalars are
    /// rendered as strings and nulls become empty strings. A document that is not
    /// a mapping (a bare scalar, a list, an empty file) yields an empty section.
    pub fn from_yaml_value(value: &serde_yaml::Value) -> Self {
        let mut section = Section::new();
        if let serde_yaml::Value::Mapping(_) = value {
            flatten_yaml(value, "", &mut section);
        }
        section
    }
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, result: &mut Section) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, val) in map {
                let key_str = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                let new_prefix = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{}.{}", prefix, key_str)
                };
                flatten_yaml(val, &new_prefix, result);
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, val) in seq.iter().enumerate() {
                flatten_yaml(val, &format!("{}.{}", prefix, i), result);
            }
        }
        serde_yaml::Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        serde_yaml::Value::Number(n) => {
            result.insert(prefix, n.to_string());
        }
        serde_yaml::Value::Bool(b) => {
            result.insert(prefix, b.to_string());
        }
        serde_yaml::Value::Null => {
            result.insert(prefix, String::new());
        }
        serde_yaml::Value::Tagged(tagged) => flatten_yaml(&tagged.value, prefix, result),
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (key, value) in iter {
            section.insert(key, value);
        }
        section
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> serde_yaml::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_insert_lowercases_keys() {
        let mut section = Section::new();
        section.insert("URL", "https://pierone.example.org");
        assert_eq!(section.iter().next().unwrap().0, "url");
        assert_eq!(section.get("Url"), Some("https://pierone.example.org"));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base: Section = [("key", "disk"), ("other", "kept")].into_iter().collect();
        base.merge([("key", "env")].into_iter().collect());
        assert_eq!(base.get("key"), Some("env"));
        assert_eq!(base.get("other"), Some("kept"));
    }

    #[test]
    fn test_to_mapping_keeps_key_order() {
        let section: Section = [("url", "https://x"), ("domain", "x")].into_iter().collect();
        let mapping = section.to_mapping();
        let keys: Vec<_> = mapping.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["domain", "url"]);
        assert_eq!(mapping.get("url").and_then(|v| v.as_str()), Some("https://x"));
    }

    #[test]
    fn test_from_yaml_simple() {
        let section = Section::from_yaml_value(&parse("domain: stups.example.org"));
        assert_eq!(section.get("domain"), Some("stups.example.org"));
    }

    #[test]
    fn test_from_yaml_nested() {
        let yaml = r#"
database:
  host: localhost
  port: 5432
"#;
        let section = Section::from_yaml_value(&parse(yaml));
        assert_eq!(section.get("database.host"), Some("localhost"));
        assert_eq!(section.get("database.port"), Some("5432"));
    }

    #[test]
    fn test_from_yaml_sequence() {
        let yaml = r#"
servers:
  - server1
  - server2
"#;
        let section = Section::from_yaml_value(&parse(yaml));
        assert_eq!(section.get("servers.0"), Some("server1"));
        assert_eq!(section.get("servers.1"), Some("server2"));
    }

    #[test]
    fn test_from_yaml_mixed_types() {
        let yaml = r#"
string_value: hello
number_value: 42
bool_value: true
null_value: null
"#;
        let section = Section::from_yaml_value(&parse(yaml));
        assert_eq!(section.get("string_value"), Some("hello"));
        assert_eq!(section.get("number_value"), Some("42"));
        assert_eq!(section.get("bool_value"), Some("true"));
        assert_eq!(section.get("null_value"), Some(""));
    }

    #[test]
    fn test_from_yaml_non_mapping_is_empty() {
        assert!(Section::from_yaml_value(&parse("just a string")).is_empty());
        assert!(Section::from_yaml_value(&parse("- a\n- b")).is_empty());
        assert!(Section::from_yaml_value(&serde_yaml::Value::Null).is_empty());
    }

    #[test]
    fn test_serializes_as_flat_mapping() {
        let section: Section = [("url", "https://x.example.org")].into_iter().collect();
        let yaml = serde_yaml::to_string(&section).unwrap();
        assert_eq!(yaml.trim(), "url: https://x.example.org");
    }
}
