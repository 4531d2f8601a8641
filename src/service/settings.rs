// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component lists and tunables of the domain configurator.

use crate::adapters::DEFAULT_PROBE_TIMEOUT;
use crate::domain::SectionName;
use std::time::Duration;

/// A component whose URL is checked for reachability and then persisted.
///
/// The URL `https://<component>.<domain>` is stored under `key` in `section`.
/// By default the section is named after the component and the key is `url`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeTarget {
    component: String,
    section: SectionName,
    key: String,
}

impl ProbeTarget {
    /// Creates a target stored as `<component>.url`.
    pub fn new(component: impl Into<String>) -> Self {
        let component = component.into();
        Self {
            section: SectionName::from(component.as_str()),
            component,
            key: "url".to_string(),
        }
    }

    /// Stores the URL under a different section and key.
    pub fn stored_as(mut self, section: impl Into<SectionName>, key: impl Into<String>) -> Self {
        self.section = section.into();
        self.key = key.into();
        self
    }

    /// The component name, used as the host label.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// The section receiving the URL.
    pub fn section(&self) -> &SectionName {
        &self.section
    }

    /// The key receiving the URL.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Settings of a [`DomainConfigurator`](crate::service::DomainConfigurator).
///
/// The component lists change as tools come and go, so they are data rather
/// than code.
///
/// # Examples
///
/// ```rust
/// use stups_config::service::{ConfiguratorSettings, ProbeTarget};
///
/// let settings = ConfiguratorSettings::default()
///     .with_autodiscovery(["zign"])
///     .with_probes([ProbeTarget::new("pierone")]);
///
/// assert_eq!(settings.autodiscovery, vec!["zign".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct ConfiguratorSettings {
    /// Components looked up at `_<component>._autoconfig.<domain>`
    pub autodiscovery: Vec<String>,
    /// Components probed at `https://<component>.<domain>`
    pub probes: Vec<ProbeTarget>,
    /// Timeout of each reachability probe
    pub probe_timeout: Duration,
    /// Whether to run the account tool after a successful commit
    pub run_account_tool: bool,
}

impl ConfiguratorSettings {
    /// Replaces the autodiscovery component list.
    pub fn with_autodiscovery<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.autodiscovery = components.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the reachability probe list.
    pub fn with_probes(mut self, probes: impl IntoIterator<Item = ProbeTarget>) -> Self {
        self.probes = probes.into_iter().collect();
        self
    }

    /// Sets the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Enables or disables the account tool.
    pub fn with_account_tool(mut self, enabled: bool) -> Self {
        self.run_account_tool = enabled;
        self
    }
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            autodiscovery: vec![
                "mai".to_string(),
                "zign".to_string(),
                "zalando-kubectl".to_string(),
            ],
            probes: vec![ProbeTarget::new("pierone"), ProbeTarget::new("even")],
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            run_account_tool: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_target_defaults() {
        let target = ProbeTarget::new("pierone");
        assert_eq!(target.component(), "pierone");
        assert_eq!(target.section().as_str(), "pierone");
        assert_eq!(target.key(), "url");
    }

    #[test]
    fn test_probe_target_stored_as() {
        let target = ProbeTarget::new("even").stored_as("piu", "even_url");
        assert_eq!(target.component(), "even");
        assert_eq!(target.section().as_str(), "piu");
        assert_eq!(target.key(), "even_url");
    }

    #[test]
    fn test_default_settings() {
        let settings = ConfiguratorSettings::default();
        assert_eq!(settings.autodiscovery, vec!["mai", "zign", "zalando-kubectl"]);
        assert_eq!(
            settings.probes,
            vec![ProbeTarget::new("pierone"), ProbeTarget::new("even")]
        );
        assert!(settings.probes.iter().all(|p| p.key() == "url"));
        assert_eq!(settings.probe_timeout, Duration::from_secs(5));
        assert!(settings.run_account_tool);
    }

    #[test]
    fn test_settings_builders() {
        let settings = ConfiguratorSettings::default()
            .with_autodiscovery(Vec::<String>::new())
            .with_probes([ProbeTarget::new("kio")])
            .with_probe_timeout(Duration::from_secs(1))
            .with_account_tool(false);
        assert!(settings.autodiscovery.is_empty());
        assert_eq!(settings.probes[0].component(), "kio");
        assert_eq!(settings.probe_timeout, Duration::from_secs(1));
        assert!(!settings.run_account_tool);
    }
}
