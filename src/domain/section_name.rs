// SPDX-License-Identifier: MIT OR Apache-2.0

//! Section name newtype for type-safe section handling.
//!
//! A section is a named configuration namespace such as `stups`, `pierone` or
//! `zign`. Its name determines both the file it lives in and the prefix of the
//! environment variables that override it.

use std::fmt;

/// A type-safe wrapper for configuration section names.
///
/// # Examples
///
/// ```
/// use stups_config::domain::SectionName;
///
/// let name = SectionName::from("zalando-kubectl");
///
/// assert_eq!(name.as_str(), "zalando-kubectl");
/// assert_eq!(name.env_prefix(), "ZALANDO_KUBECTL_");
/// assert_eq!(name.file_name(), "zalando-kubectl.yaml");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionName(String);

impl SectionName {
    /// Creates a new `SectionName` from a `String`.
    pub fn new(name: String) -> Self {
        SectionName(name)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the prefix of environment variables that override this section.
    ///
    /// The name is uppercased, dashes become underscores and a trailing
    /// underscore separates the prefix from the key.
    pub fn env_prefix(&self) -> String {
        format!("{}_", self.0.to_uppercase().replace('-', "_"))
    }

    /// Returns the file name this section is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.0)
    }
}

impl From<String> for SectionName {
    fn from(s: String) -> Self {
        SectionName(s)
    }
}

impl From<&str> for SectionName {
    fn from(s: &str) -> Self {
        SectionName(s.to_string())
    }
}

impl AsRef<str> for SectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
