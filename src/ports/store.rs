// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration store trait definition.
//!
//! This module defines the `ConfigStore` trait, the port through which the
//! configurator reads and persists configuration sections. The production
//! implementation keeps one YAML file per section, but anything that can map a
//! section name to a YAML mapping can implement it.

use crate::domain::{Result, Section, SectionName};
use serde_yaml::Mapping;

/// A trait for configuration section stores.
///
/// # Contract
///
/// - `load` never fails: a missing or unreadable section is an empty [`Section`].
/// - `store_value` replaces the whole section with a YAML mapping, keeping its
///   shape (nesting, lists, scalar types). A store that cannot write because
///   the section was deliberately made read-only reports success.
/// - `store` writes a flat [`Section`] through `store_value`.
///
/// # Examples
///
/// ```rust
/// use stups_config::ports::ConfigStore;
/// use stups_config::domain::{Result, Section, SectionName};
/// use serde_yaml::{Mapping, Value};
/// use std::collections::HashMap;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct MemoryStore(Mutex<HashMap<SectionName, Mapping>>);
///
/// impl ConfigStore for MemoryStore {
///     fn load(&self, section: &SectionName) -> Section {
///         self.0
///             .lock()
///             .unwrap()
///             .get(section)
///             .map(|m| Section::from_yaml_value(&Value::Mapping(m.clone())))
///             .unwrap_or_default()
///     }
///
///     fn store_value(&self, values: &Mapping, section: &SectionName) -> Result<()> {
///         self.0.lock().unwrap().insert(section.clone(), values.clone());
///         Ok(())
///     }
/// }
///
/// let store = MemoryStore::default();
/// let name = SectionName::from("stups");
/// assert!(store.load(&name).is_empty());
///
/// let mut values = Section::new();
/// values.insert("domain", "stups.example.org");
/// store.store(&values, &name).unwrap();
/// assert_eq!(store.load(&name).get("domain"), Some("stups.example.org"));
/// ```
pub trait ConfigStore {
    /// Loads a section, returning an empty section if it does not exist.
    fn load(&self, section: &SectionName) -> Section;

    /// Persists a YAML mapping as a section, replacing its previous content.
    fn store_value(&self, values: &Mapping, section: &SectionName) -> Result<()>;

    /// Persists a flat section, replacing its previous content.
    fn store(&self, values: &Section, section: &SectionName) -> Result<()> {
        self.store_value(&values.to_mapping(), section)
    }

    /// Loads a section by its string name.
    ///
    /// Equivalent to `load(&SectionName::from(section))`.
    fn load_str(&self, section: &str) -> Section {
        self.load(&SectionName::from(section))
    }
}
