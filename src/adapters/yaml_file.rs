// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file configuration store adapter.
//!
//! This module provides the production [`ConfigStore`]: one YAML file per section
//! at `<config dir>/<section>/<section>.yaml`, overlaid with environment variable
//! overrides at load time.

use crate::adapters::EnvVarAdapter;
use crate::domain::{ConfigError, Result, Section, SectionName};
use crate::ports::ConfigStore;
use directories::BaseDirs;
use serde_yaml::Mapping;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Parses YAML content into a section.
///
/// Nested values are flattened with dot notation; a document that is not a
/// mapping yields an empty section.
pub fn parse_section(content: &str) -> Result<Section> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;
    Ok(Section::from_yaml_value(&value))
}

/// Configuration store keeping one YAML file per section.
///
/// # Loading
///
/// A missing, oversized or unparsable file loads as an empty section. Every
/// environment variable named `<SECTION>_<KEY>` is then overlaid, so the
/// environment always wins over file contents.
///
/// # Storing
///
/// The section directory is created if needed and the file is replaced with
/// the mapping as given, nested values and scalar types included. A
/// permission error on the write itself is logged and ignored: users lock shared
/// files read-only to keep concurrently running tools from corrupting them.
///
/// # Examples
///
/// ```rust
/// use stups_config::adapters::YamlFileStore;
/// use stups_config::domain::{Section, SectionName};
/// use stups_config::ports::ConfigStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = YamlFileStore::with_root(dir.path());
/// let name = SectionName::from("pierone");
///
/// let mut section = Section::new();
/// section.insert("url", "https://pierone.stups.example.org");
/// store.store(&section, &name).unwrap();
///
/// assert!(dir.path().join("pierone").join("pierone.yaml").exists());
/// assert_eq!(store.load(&name), section);
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileStore {
    /// Directory holding one subdirectory per section
    root: PathBuf,
    /// Fixed environment used instead of the process environment
    env_vars: Option<HashMap<String, String>>,
}

impl YamlFileStore {
    /// Creates a store rooted at the platform configuration directory.
    ///
    /// This is `~/.config` on Linux, `~/Library/Application Support` on macOS
    /// and the roaming application data folder on Windows.
    pub fn from_default_location() -> Result<Self> {
        let base_dirs = BaseDirs::new().ok_or_else(|| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: "Failed to determine configuration directory".to_string(),
            source: None,
        })?;

        Ok(Self::with_root(base_dirs.config_dir()))
    }

    /// Creates a store rooted at `root`.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env_vars: None,
        }
    }

    /// Uses a fixed set of environment variables for overrides.
    ///
    /// **Note**: This is primarily intended for testing.
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Returns the file path of `section`.
    pub fn path_for(&self, section: &SectionName) -> PathBuf {
        self.root.join(section.as_str()).join(section.file_name())
    }

    fn env_adapter(&self, section: &SectionName) -> EnvVarAdapter {
        let adapter = EnvVarAdapter::for_section(section);
        match &self.env_vars {
            Some(vars) => adapter.with_vars(vars.clone()),
            None => adapter,
        }
    }

    fn read_file(&self, path: &Path) -> Result<Section> {
        // Check file size before reading to prevent DoS via large files
        let metadata = fs::metadata(path)?;
        if metadata.len() > MAX_YAML_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: "yaml-file".to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_YAML_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(path)?;
        parse_section(&content)
    }
}

impl ConfigStore for YamlFileStore {
    fn load(&self, section: &SectionName) -> Section {
        let path = self.path_for(section);

        let mut values = match self.read_file(&path) {
            Ok(values) => values,
            Err(ConfigError::IoError(e)) if e.kind() == ErrorKind::NotFound => Section::new(),
            Err(e) => {
                tracing::debug!(
                    "Ignoring unreadable configuration file {}: {}",
                    path.display(),
                    e
                );
                Section::new()
            }
        };

        self.env_adapter(section).overlay(&mut values);
        values
    }

    fn store_value(&self, values: &Mapping, section: &SectionName) -> Result<()> {
        let path = self.path_for(section);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_yaml::to_string(values).map_err(|e| ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: format!("Failed to serialize section '{}'", section),
            source: Some(Box::new(e)),
        })?;

        match fs::write(&path, content) {
            Ok(()) => {
                tracing::debug!("Wrote section '{}' to {}", section, path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                tracing::info!(
                    "Not writing {}: permission denied (file is read-only)",
                    path.display()
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
