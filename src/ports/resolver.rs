// SPDX-License-Identifier: MIT OR Apache-2.0

//! DNS resolver trait definition.

use crate::domain::Result;

/// A trait for the DNS queries the configurator needs.
///
/// Implementations should report query failures as
/// [`ConfigError::DnsError`](crate::domain::ConfigError::DnsError) so that
/// autodiscovery can tell DNS failures apart from payload errors.
pub trait DnsResolver {
    /// Checks whether `domain` exists in DNS.
    ///
    /// A name that exists but has no records of the queried type still counts as
    /// existing. Returns `Ok(false)` for names that do not exist and `Err` when the
    /// question could not be answered at all.
    fn domain_exists(&self, domain: &str) -> Result<bool>;

    /// Returns the TXT records published at `name`, one string per record.
    ///
    /// The character-strings of a single record are concatenated.
    fn txt_records(&self, name: &str) -> Result<Vec<String>>;
}
