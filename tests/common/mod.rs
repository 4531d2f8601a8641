// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted collaborators for configurator tests.
//!
//! Every double shares its state through an `Arc`, so a test can hand a clone to
//! the configurator and inspect the original afterwards.

#![allow(dead_code)]

use serde_yaml::{Mapping, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::sync::{Arc, Mutex};
use stups_config::domain::{ConfigError, Result, Section, SectionName};
use stups_config::ports::{AccountTool, ConfigStore, DnsResolver, ReachabilityProbe, Terminal};

/// Helper to set environment variables, restoring their previous values on drop
pub struct EnvGuard {
    saved: Vec<(String, Option<OsString>)>,
}

impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { saved: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.saved.push((key.to_string(), env::var_os(key)));
        env::set_var(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.saved.push((key.to_string(), env::var_os(key)));
        env::remove_var(key);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.saved.iter().rev() {
            match previous {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

/// In-memory section store recording every write.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<SectionName, Mapping>>>,
    writes: Arc<Mutex<Vec<SectionName>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a section without counting it as a write.
    pub fn with_section(self, name: &str, entries: &[(&str, &str)]) -> Self {
        let section: Section = entries.iter().copied().collect();
        self.documents
            .lock()
            .unwrap()
            .insert(SectionName::from(name), section.to_mapping());
        self
    }

    /// The flat view of a stored section.
    pub fn section(&self, name: &str) -> Option<Section> {
        self.document(name)
            .map(|mapping| Section::from_yaml_value(&Value::Mapping(mapping)))
    }

    /// The stored document of a section, as written.
    pub fn document(&self, name: &str) -> Option<Mapping> {
        self.documents
            .lock()
            .unwrap()
            .get(&SectionName::from(name))
            .cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self, section: &SectionName) -> Section {
        self.section(section.as_str()).unwrap_or_default()
    }

    fn store_value(&self, values: &Mapping, section: &SectionName) -> Result<()> {
        self.documents
            .lock()
            .unwrap()
            .insert(section.clone(), values.clone());
        self.writes.lock().unwrap().push(section.clone());
        Ok(())
    }
}

/// Resolver answering from fixed tables.
///
/// Names without a TXT entry fail with a DNS error, like NXDOMAIN.
#[derive(Clone, Default)]
pub struct ScriptedResolver {
    existing: Arc<Mutex<HashSet<String>>>,
    txt: Arc<Mutex<HashMap<String, Vec<String>>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(self, domain: &str) -> Self {
        self.existing.lock().unwrap().insert(domain.to_string());
        self
    }

    pub fn with_txt(self, name: &str, records: &[&str]) -> Self {
        self.txt.lock().unwrap().insert(
            name.to_string(),
            records.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    /// Publishes empty autoconfig records for `components` under `domain`.
    pub fn with_empty_autoconfig(self, domain: &str, components: &[&str]) -> Self {
        components.iter().fold(self, |resolver, component| {
            resolver.with_txt(&format!("_{}._autoconfig.{}", component, domain), &[""])
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl DnsResolver for ScriptedResolver {
    fn domain_exists(&self, domain: &str) -> Result<bool> {
        self.queries.lock().unwrap().push(domain.to_string());
        Ok(self.existing.lock().unwrap().contains(domain))
    }

    fn txt_records(&self, name: &str) -> Result<Vec<String>> {
        self.queries.lock().unwrap().push(name.to_string());
        self.txt
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::DnsError {
                name: name.to_string(),
                message: "NXDOMAIN".to_string(),
                source: None,
            })
    }
}

/// Probe failing for a fixed set of URLs.
#[derive(Clone, Default)]
pub struct ScriptedProbe {
    failing: Arc<Mutex<HashSet<String>>>,
    probed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(self, url: &str) -> Self {
        self.failing.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

impl ReachabilityProbe for ScriptedProbe {
    fn probe(&self, url: &str) -> Result<()> {
        self.probed.lock().unwrap().push(url.to_string());
        if self.failing.lock().unwrap().contains(url) {
            Err(ConfigError::HttpError {
                url: url.to_string(),
                message: "connection refused".to_string(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}

/// A prompt the terminal was asked to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptRecord {
    pub message: String,
    pub default: Option<String>,
}

#[derive(Default)]
struct TerminalState {
    answers: VecDeque<String>,
    prompts: Vec<PromptRecord>,
    lines: Vec<String>,
}

/// Terminal replaying queued answers; an empty answer selects the default.
///
/// Running out of answers behaves like a closed stdin.
#[derive(Clone, Default)]
pub struct ScriptedTerminal {
    state: Arc<Mutex<TerminalState>>,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(self, answers: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .answers
            .extend(answers.iter().map(|a| a.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<PromptRecord> {
        self.state.lock().unwrap().prompts.clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.lock().unwrap().lines.clone()
    }

    pub fn transcript(&self) -> String {
        self.lines().join("\n")
    }
}

impl Terminal for ScriptedTerminal {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.prompts.push(PromptRecord {
            message: message.to_string(),
            default: default.map(str::to_string),
        });
        let answer = state.answers.pop_front().ok_or(ConfigError::PromptError {
            message: "end of input".to_string(),
        })?;
        match (answer.is_empty(), default) {
            (true, Some(default)) => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn action(&mut self, message: &str) {
        self.state.lock().unwrap().lines.push(format!("{}..", message));
    }

    fn ok(&mut self) {
        if let Some(line) = self.state.lock().unwrap().lines.last_mut() {
            line.push_str(" OK");
        }
    }

    fn error(&mut self, message: &str) {
        let mut state = self.state.lock().unwrap();
        let pending = state.lines.last().is_some_and(|l| l.ends_with(".."));
        if pending {
            if let Some(line) = state.lines.last_mut() {
                line.push(' ');
                line.push_str(message);
            }
        } else {
            state.lines.push(message.to_string());
        }
    }

    fn info(&mut self, message: &str) {
        self.state.lock().unwrap().lines.push(message.to_string());
    }
}

/// Account tool recording the identity provider URLs it was run with.
#[derive(Clone)]
pub struct RecordingAccountTool {
    calls: Arc<Mutex<Vec<String>>>,
    succeed: bool,
}

impl RecordingAccountTool {
    pub fn new(succeed: bool) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            succeed,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AccountTool for RecordingAccountTool {
    fn create_all(&self, identity_provider_url: &str) -> Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(identity_provider_url.to_string());
        Ok(self.succeed)
    }
}
