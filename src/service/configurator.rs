// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive domain configurator.
//!
//! This module drives the bootstrap flow: settle on a domain that resolves,
//! autodiscover component settings from DNS TXT records, check that component
//! URLs answer, and persist everything through a [`ConfigStore`] only if every
//! probe of the attempt succeeded. A failed attempt proposes a new domain and
//! starts over.

use crate::adapters::{ConsoleTerminal, HickoryResolver, HttpProbe, MaiCommand, YamlFileStore};
use crate::domain::{AutoConfig, DomainName, Result, Section, SectionName};
use crate::ports::{AccountTool, ConfigStore, DnsResolver, ReachabilityProbe, Terminal};
use crate::service::{ConfiguratorSettings, ProbeTarget};
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, HashMap};

/// Section holding the selected domain.
pub const STUPS_SECTION: &str = "stups";

/// Section holding the token service settings.
pub const ZIGN_SECTION: &str = "zign";

const DOMAIN_PROMPT: &str = "Please enter your STUPS domain (e.g. \"stups.example.org\")";
const USERNAME_PROMPT: &str = "Please enter your username for the token service";

/// Outcome of one pass through autodiscovery and reachability checks.
#[derive(Clone, Debug)]
pub struct AttemptReport {
    /// The domain that was checked
    pub domain: DomainName,
    /// Payloads discovered so far
    pub autoconfig: AutoConfig,
    /// Every probed URL, whether or not it answered
    pub urls: Vec<(ProbeTarget, String)>,
    /// Token service username, if one was asked for
    pub username: Option<String>,
    /// Autodiscovery failures caused by DNS
    pub dns_errors: usize,
    /// Autodiscovery failures with any other cause
    pub discovery_errors: usize,
    /// Reachability probes that got no response
    pub probe_errors: usize,
}

impl AttemptReport {
    fn new(domain: DomainName) -> Self {
        Self {
            domain,
            autoconfig: AutoConfig::new(),
            urls: Vec::new(),
            username: None,
            dns_errors: 0,
            discovery_errors: 0,
            probe_errors: 0,
        }
    }

    /// Total number of failures recorded in the attempt.
    pub fn error_count(&self) -> usize {
        self.dns_errors + self.discovery_errors + self.probe_errors
    }

    /// Returns true if nothing failed, which is what allows a commit.
    pub fn is_success(&self) -> bool {
        self.error_count() == 0
    }

    /// Token service URL announced by the zign autoconfig record.
    pub fn token_service_url(&self) -> Option<&str> {
        self.autoconfig.str_field(ZIGN_SECTION, "token_service_url")
    }

    /// All sections to persist for this attempt, keyed by section name.
    ///
    /// Autoconfig payloads are kept as discovered. The domain, probed URLs and
    /// the token service user and URL are added on top of them, so those win on
    /// key conflicts.
    pub fn sections(&self) -> BTreeMap<SectionName, Mapping> {
        let mut flat: BTreeMap<SectionName, Section> = BTreeMap::new();

        flat.entry(SectionName::from(STUPS_SECTION))
            .or_default()
            .insert("domain", self.domain.as_str());

        for (target, url) in &self.urls {
            flat.entry(target.section().clone())
                .or_default()
                .insert(target.key(), url.as_str());
        }

        if let Some(token_url) = self.token_service_url() {
            let zign = flat.entry(SectionName::from(ZIGN_SECTION)).or_default();
            if let Some(user) = &self.username {
                zign.insert("user", user.as_str());
            }
            zign.insert("url", token_url);
        }

        let mut sections: BTreeMap<SectionName, Mapping> = self
            .autoconfig
            .iter()
            .filter_map(|(component, _)| {
                let payload = self.autoconfig.mapping(component)?;
                Some((SectionName::from(component), payload.clone()))
            })
            .collect();

        for (name, section) in flat {
            sections.entry(name).or_default().extend(section.to_mapping());
        }

        sections
    }
}

/// The interactive domain configurator.
///
/// # Examples
///
/// ```rust,no_run
/// use stups_config::service::DomainConfigurator;
///
/// # fn main() -> stups_config::domain::Result<()> {
/// let mut configurator = DomainConfigurator::builder().build()?;
/// configurator.configure(Some("stups.example.org"))?;
/// # Ok(())
/// # }
/// ```
pub struct DomainConfigurator {
    store: Box<dyn ConfigStore>,
    resolver: Box<dyn DnsResolver>,
    probe: Box<dyn ReachabilityProbe>,
    terminal: Box<dyn Terminal>,
    account_tool: Box<dyn AccountTool>,
    settings: ConfiguratorSettings,
    /// Sections read during this run, loaded at most once each
    loaded: HashMap<SectionName, Section>,
}

impl DomainConfigurator {
    /// Creates a new configurator builder.
    pub fn builder() -> DomainConfiguratorBuilder {
        DomainConfiguratorBuilder::new()
    }

    /// Runs attempts until one completes without errors, then persists it.
    ///
    /// The first candidate is `preselected`, else the domain stored in the
    /// `stups` section. After a failed attempt the user is offered a guessed
    /// replacement domain. Returns `Err` only if the user's input ends or a
    /// section cannot be written.
    pub fn configure(&mut self, preselected: Option<&str>) -> Result<()> {
        let mut candidate = preselected
            .map(DomainName::from)
            .filter(|d| !d.is_empty())
            .or_else(|| {
                self.section(STUPS_SECTION)
                    .get("domain")
                    .map(DomainName::from)
            });
        let mut confirm = false;

        loop {
            let domain = self.resolve_domain(candidate.take(), confirm)?;
            tracing::info!("Configuring STUPS domain {}", domain);

            let report = self.run_attempt(&domain)?;
            if report.is_success() {
                self.commit(&report)?;
                self.after_commit(&report);
                return Ok(());
            }

            let guess = domain.guess_replacement();
            tracing::warn!(
                "Attempt for {} failed with {} error(s) ({} DNS, {} autoconfig, {} HTTP)",
                domain,
                report.error_count(),
                report.dns_errors,
                report.discovery_errors,
                report.probe_errors
            );
            self.terminal.error(&format!(
                "Failed to configure domain {}: {} check(s) failed. Maybe your STUPS domain is {}?",
                domain,
                report.error_count(),
                guess
            ));
            candidate = Some(guess);
            confirm = true;
        }
    }

    /// Runs autodiscovery, reachability checks and the username prompt for `domain`.
    ///
    /// Nothing is persisted; see [`configure`](Self::configure) for the full flow.
    pub fn run_attempt(&mut self, domain: &DomainName) -> Result<AttemptReport> {
        let mut report = AttemptReport::new(domain.clone());

        for component in self.settings.autodiscovery.clone() {
            self.autodiscover(&component, &mut report);
        }

        for target in self.settings.probes.clone() {
            let url = domain.component_url(target.component());
            self.terminal.action(&format!("Checking {}", url));
            match self.probe.probe(&url) {
                Ok(()) => self.terminal.ok(),
                Err(e) => {
                    tracing::warn!("{}", e);
                    self.terminal.error("ERROR");
                    report.probe_errors += 1;
                }
            }
            report.urls.push((target, url));
        }

        if report.token_service_url().is_some() {
            let default = self
                .section(ZIGN_SECTION)
                .get("user")
                .map(str::to_string)
                .or_else(default_username);
            let user = self.terminal.prompt(USERNAME_PROMPT, default.as_deref())?;
            report.username = Some(user);
        }

        Ok(report)
    }

    fn autodiscover(&mut self, component: &str, report: &mut AttemptReport) {
        let record = report.domain.autoconfig_record(component);
        self.terminal
            .action(&format!("Trying to autoconfigure {}", component));

        let result = self.resolver.txt_records(&record).and_then(|payloads| {
            payloads
                .iter()
                .try_for_each(|payload| report.autoconfig.insert_payload(component, payload))
        });

        match result {
            Ok(()) => self.terminal.ok(),
            Err(e) if e.is_dns() => {
                tracing::warn!("{}", e);
                self.terminal.error("DNS ERROR");
                report.dns_errors += 1;
            }
            Err(e) => {
                tracing::warn!("Autoconfiguration of {} failed: {}", component, e);
                self.terminal.error("ERROR");
                report.discovery_errors += 1;
            }
        }
    }

    /// Settles on a domain that exists in DNS, prompting as often as needed.
    fn resolve_domain(&mut self, candidate: Option<DomainName>, confirm: bool) -> Result<DomainName> {
        let mut candidate = candidate.filter(|d| !d.is_empty());

        if confirm {
            candidate = Some(self.prompt_domain(candidate.as_ref())?);
        }

        loop {
            if let Some(domain) = &candidate {
                match self.resolver.domain_exists(domain.as_str()) {
                    Ok(true) => return Ok(domain.clone()),
                    Ok(false) => {
                        self.terminal
                            .error(&format!("Domain {} does not exist", domain));
                    }
                    Err(e) => {
                        tracing::warn!("{}", e);
                        self.terminal
                            .error(&format!("Domain {} could not be resolved", domain));
                    }
                }
            }
            candidate = Some(self.prompt_domain(candidate.as_ref())?);
        }
    }

    fn prompt_domain(&mut self, default: Option<&DomainName>) -> Result<DomainName> {
        let default = default.filter(|d| !d.is_empty()).map(DomainName::as_str);
        let answer = self.terminal.prompt(DOMAIN_PROMPT, default)?;
        Ok(DomainName::from(answer))
    }

    fn commit(&mut self, report: &AttemptReport) -> Result<()> {
        for (name, mapping) in report.sections() {
            self.terminal
                .action(&format!("Writing config for {}", name));
            self.store.store_value(&mapping, &name)?;
            self.terminal.ok();
            let section = Section::from_yaml_value(&Value::Mapping(mapping));
            self.loaded.insert(name, section);
        }
        Ok(())
    }

    fn after_commit(&mut self, report: &AttemptReport) {
        let autoconfig = &report.autoconfig;
        if let Some(pattern) = autoconfig.str_field("mai", "saml_user_pattern") {
            self.terminal.info(&format!(
                "Please use the following pattern for your SAML username: {}",
                pattern
            ));

            let idp_url = autoconfig.str_field("mai", "saml_identity_provider_url");
            if let (Some(idp_url), true) = (idp_url, self.settings.run_account_tool) {
                self.terminal
                    .info("Now running \"mai create-all\" to configure your AWS profile(s)..");
                match self.account_tool.create_all(idp_url) {
                    Ok(true) => self.terminal.info(
                        "You can now use \"mai login ..\" to get temporary AWS credentials for your AWS account(s).",
                    ),
                    Ok(false) => tracing::warn!("mai create-all exited with an error"),
                    Err(e) => {
                        tracing::warn!("{}", e);
                        self.terminal.error(&format!("Could not run mai: {}", e));
                    }
                }
                return;
            }
        }

        self.terminal.info(&format!(
            "Configuration for {} is complete. You can now use the STUPS command line tools, e.g. \"pierone login\".",
            report.domain
        ));
    }

    /// Returns a section, loading it from the store on first use.
    fn section(&mut self, name: &str) -> &Section {
        let name = SectionName::from(name);
        if !self.loaded.contains_key(&name) {
            let section = self.store.load(&name);
            self.loaded.insert(name.clone(), section);
        }
        &self.loaded[&name]
    }
}

fn default_username() -> Option<String> {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
}

/// Builder for constructing a `DomainConfigurator`.
///
/// Collaborators that are not supplied fall back to the production adapters:
/// YAML files in the platform config directory, the system DNS resolver, HTTP
/// probes, stdin/stderr and the `mai` executable.
#[derive(Default)]
pub struct DomainConfiguratorBuilder {
    store: Option<Box<dyn ConfigStore>>,
    resolver: Option<Box<dyn DnsResolver>>,
    probe: Option<Box<dyn ReachabilityProbe>>,
    terminal: Option<Box<dyn Terminal>>,
    account_tool: Option<Box<dyn AccountTool>>,
    settings: ConfiguratorSettings,
}

impl DomainConfiguratorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration store.
    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the DNS resolver.
    pub fn with_resolver(mut self, resolver: Box<dyn DnsResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the reachability probe.
    pub fn with_probe(mut self, probe: Box<dyn ReachabilityProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Sets the terminal.
    pub fn with_terminal(mut self, terminal: Box<dyn Terminal>) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Sets the account tool.
    pub fn with_account_tool(mut self, tool: Box<dyn AccountTool>) -> Self {
        self.account_tool = Some(tool);
        self
    }

    /// Sets the configurator settings.
    pub fn with_settings(mut self, settings: ConfiguratorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the configurator.
    pub fn build(self) -> Result<DomainConfigurator> {
        let store: Box<dyn ConfigStore> = match self.store {
            Some(store) => store,
            None => Box::new(YamlFileStore::from_default_location()?),
        };
        let resolver: Box<dyn DnsResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => Box::new(HickoryResolver::from_system_conf()?),
        };
        let probe: Box<dyn ReachabilityProbe> = match self.probe {
            Some(probe) => probe,
            None => Box::new(HttpProbe::new(self.settings.probe_timeout)?),
        };
        let terminal: Box<dyn Terminal> = self
            .terminal
            .unwrap_or_else(|| Box::new(ConsoleTerminal::stdio()));
        let account_tool: Box<dyn AccountTool> = self
            .account_tool
            .unwrap_or_else(|| Box::new(MaiCommand::new()));

        Ok(DomainConfigurator {
            store,
            resolver,
            probe,
            terminal,
            account_tool,
            settings: self.settings,
            loaded: HashMap::new(),
        })
    }
}
