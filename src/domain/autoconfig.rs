// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autodiscovered component settings.

use crate::domain::{ConfigError, Result};
use serde_yaml::Mapping;
use std::collections::BTreeMap;

/// Component settings collected from `_<component>._autoconfig.<domain>` TXT records.
///
/// Payloads are opaque YAML values; the configurator only peeks at a few
/// well-known fields (`token_service_url`, `saml_user_pattern`, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutoConfig {
    entries: BTreeMap<String, serde_yaml::Value>,
}

impl AutoConfig {
    /// Creates an empty autoconfig map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TXT payload and stores it for `component`, replacing any earlier payload.
    pub fn insert_payload(&mut self, component: &str, payload: &str) -> Result<()> {
        let value = if payload.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(payload).map_err(|e| ConfigError::ParseError {
                message: format!("Invalid autoconfig payload for '{}': {}", component, e),
                source: Some(Box::new(e)),
            })?
        };
        self.entries.insert(component.to_string(), value);
        Ok(())
    }

    /// Returns the raw payload for `component`.
    pub fn get(&self, component: &str) -> Option<&serde_yaml::Value> {
        self.entries.get(component)
    }

    /// Returns a string field of a component's payload.
    pub fn str_field(&self, component: &str, field: &str) -> Option<&str> {
        self.get(component)?
            .get(field)?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    /// Returns a component's payload if it is a non-empty mapping.
    ///
    /// This is the document persisted for the component, unchanged.
    pub fn mapping(&self, component: &str) -> Option<&Mapping> {
        self.get(component)?
            .as_mapping()
            .filter(|mapping| !mapping.is_empty())
    }

    /// Iterates over components and their payloads.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_yaml::Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
