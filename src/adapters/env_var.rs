// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable overlay adapter.
//!
//! This module provides an adapter that reads section overrides from
//! environment variables.

use crate::domain::{Section, SectionName};
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Adapter that turns environment variables into section entries.
///
/// Only variables starting with the configured prefix are used. The prefix is
/// stripped and the remainder, lowercased, becomes the key. Variables
/// are read at every call, so changes to the environment are always visible.
///
/// # Examples
///
/// ```rust
/// use stups_config::adapters::EnvVarAdapter;
/// use stups_config::domain::SectionName;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("EXAMPLE_PROJ_MY_KEY".to_string(), "some value".to_string());
/// vars.insert("OTHER_KEY".to_string(), "ignored".to_string());
///
/// let adapter = EnvVarAdapter::for_section(&SectionName::from("example-proj")).with_vars(vars);
/// let section = adapter.section();
///
/// assert_eq!(section.get("my_key"), Some("some value"));
/// assert_eq!(section.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EnvVarAdapter {
    /// Prefix to filter environment variables
    prefix: String,
    /// Fixed variables used instead of the process environment
    vars: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter reading variables that start with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Creates an adapter for the overrides of `section`.
    pub fn for_section(section: &SectionName) -> Self {
        Self::with_prefix(section.env_prefix())
    }

    /// Uses a fixed set of variables instead of the process environment.
    ///
    /// **Note**: This is primarily intended for testing.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Returns the prefix this adapter filters on.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Collects the matching variables into a section.
    pub fn section(&self) -> Section {
        let vars: Box<dyn Iterator<Item = (String, String)>> = match &self.vars {
            Some(vars) => Box::new(vars.clone().into_iter()),
            None => Box::new(
                env::vars_os()
                    .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
            ),
        };

        let mut section = Section::new();
        for (key, value) in vars {
            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            let stripped = match key.strip_prefix(&self.prefix) {
                Some(stripped) if !stripped.is_empty() => stripped,
                _ => continue,
            };

            section.insert(stripped, value);
        }

        tracing::debug!(
            "Loaded {} environment overrides (prefix={:?})",
            section.len(),
            self.prefix
        );

        section
    }

    /// Overlays the matching variables onto `section`, replacing existing values.
    pub fn overlay(&self, section: &mut Section) {
        section.merge(self.section());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_adapter_reads_process_env() {
        let mut guard = EnvGuard::new();
        guard.set("ENVADAPTERTEST_CONFIG_VAR", "test_value");

        let adapter = EnvVarAdapter::with_prefix("ENVADAPTERTEST_");
        let section = adapter.section();

        assert_eq!(section.get("config_var"), Some("test_value"));
    }

    #[test]
    fn test_env_adapter_ignores_other_prefixes() {
        let mut guard = EnvGuard::new();
        guard.set("PREFIXTEST_DATABASE_HOST", "localhost");
        guard.set("PREFIXTESTX_OTHER", "should_not_appear");

        let adapter = EnvVarAdapter::with_prefix("PREFIXTEST_");
        let section = adapter.section();

        assert_eq!(section.get("database_host"), Some("localhost"));
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_env_adapter_for_section() {
        let adapter = EnvVarAdapter::for_section(&SectionName::from("zalando-kubectl"));
        assert_eq!(adapter.prefix(), "ZALANDO_KUBECTL_");
    }

    #[test]
    fn test_env_adapter_bare_prefix_is_skipped() {
        let mut vars = HashMap::new();
        vars.insert("ZIGN_".to_string(), "value".to_string());
        let adapter = EnvVarAdapter::with_prefix("ZIGN_").with_vars(vars);
        assert!(adapter.section().is_empty());
    }

    #[test]
    fn test_env_adapter_skips_oversized_values() {
        let mut vars = HashMap::new();
        vars.insert("BIG_VALUE".to_string(), "x".repeat(MAX_ENV_VALUE_LEN + 1));
        vars.insert("BIG_SMALL".to_string(), "ok".to_string());
        let adapter = EnvVarAdapter::with_prefix("BIG_").with_vars(vars);
        let section = adapter.section();
        assert_eq!(section.get("small"), Some("ok"));
        assert_eq!(section.get("value"), None);
    }

    #[test]
    fn test_env_adapter_overlay_wins() {
        let mut vars = HashMap::new();
        vars.insert("PIERONE_URL".to_string(), "https://env.example.org".to_string());
        let adapter = EnvVarAdapter::with_prefix("PIERONE_").with_vars(vars);

        let mut section: Section = [("url", "https://disk.example.org"), ("team", "a")]
            .into_iter()
            .collect();
        adapter.overlay(&mut section);

        assert_eq!(section.get("url"), Some("https://env.example.org"));
        assert_eq!(section.get("team"), Some("a"));
    }

    #[test]
    fn test_env_adapter_sees_changes() {
        let mut guard = EnvGuard::new();
        guard.set("RELOADTEST_KEY", "initial");

        let adapter = EnvVarAdapter::with_prefix("RELOADTEST_");
        assert_eq!(adapter.section().get("key"), Some("initial"));

        guard.set("RELOADTEST_KEY", "updated");
        assert_eq!(adapter.section().get("key"), Some("updated"));
    }
}
