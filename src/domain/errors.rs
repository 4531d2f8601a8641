// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur while loading and storing
//! configuration sections, probing a domain, or talking to the user. All errors use
//! `thiserror` for proper error handling and conversion.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// Probe failures (DNS, HTTP) are represented by this type as well, but the
/// configurator treats them as values to aggregate rather than errors to propagate.
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use stups_config::domain::errors::ConfigError;
///
/// fn lookup() -> Result<Vec<String>, ConfigError> {
///     Err(ConfigError::DnsError {
///         name: "_mai._autoconfig.example.org".to_string(),
///         message: "no records found".to_string(),
///         source: None,
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An error occurred in the configuration store.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a configuration file or autoconfig payload.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A DNS query failed.
    #[error("DNS lookup for '{name}' failed: {message}")]
    DnsError {
        /// The queried record name
        name: String,
        /// The error message
        message: String,
        /// The underlying resolver error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An HTTP reachability probe failed at the transport level.
    #[error("Request to '{url}' failed: {message}")]
    HttpError {
        /// The probed URL
        url: String,
        /// The error message
        message: String,
        /// The underlying transport error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Interactive input could not be read.
    #[error("Prompt failed: {message}")]
    PromptError {
        /// The error message
        message: String,
    },

    /// An external command could not be run.
    #[error("Command '{command}' failed: {message}")]
    CommandError {
        /// The program that was invoked
        command: String,
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading or writing configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns true if this error came from a DNS query.
    ///
    /// Autodiscovery reports DNS failures separately from everything else.
    pub fn is_dns(&self) -> bool {
        matches!(self, ConfigError::DnsError { .. })
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
