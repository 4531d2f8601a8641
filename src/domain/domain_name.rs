// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate STUPS domain names.

use std::fmt;

/// Label used when guessing a replacement for a domain that failed its checks.
pub const STUPS_LABEL: &str = "stups";

/// A dot-separated domain candidate such as `stups.example.org`.
///
/// A `DomainName` is only a candidate: whether it resolves is checked by the
/// configurator before any probe runs.
///
/// # Examples
///
/// ```
/// use stups_config::domain::DomainName;
///
/// let domain = DomainName::from("example.org");
/// assert_eq!(domain.guess_replacement().as_str(), "stups.example.org");
///
/// let domain = DomainName::from("team.stups.example.org");
/// assert_eq!(domain.guess_replacement().as_str(), "stups.stups.example.org");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DomainName(String);

impl DomainName {
    /// Creates a new `DomainName`, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        DomainName(name.as_ref().trim().to_string())
    }

    /// Returns the domain as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the candidate is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record name queried for a component's autoconfig TXT record.
    pub fn autoconfig_record(&self, component: &str) -> String {
        format!("_{}._autoconfig.{}", component, self.0)
    }

    /// URL probed for a component's reachability.
    pub fn component_url(&self, component: &str) -> String {
        format!("https://{}.{}", component, self.0)
    }

    /// Proposes a new candidate after a failed attempt.
    ///
    /// Two labels or fewer get `stups` prepended; longer names get their first
    /// label replaced with `stups`.
    pub fn guess_replacement(&self) -> DomainName {
        let mut parts: Vec<&str> = self.0.split('.').collect();
        if parts.len() <= 2 {
            parts.insert(0, STUPS_LABEL);
        } else {
            parts[0] = STUPS_LABEL;
        }
        DomainName(parts.join("."))
    }
}

impl From<&str> for DomainName {
    fn from(s: &str) -> Self {
        DomainName::new(s)
    }
}

impl From<String> for DomainName {
    fn from(s: String) -> Self {
        DomainName::new(s)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
