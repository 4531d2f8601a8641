// SPDX-License-Identifier: MIT OR Apache-2.0

//! DNS resolver adapter backed by `hickory-resolver`.

use crate::domain::{ConfigError, Result};
use crate::ports::DnsResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::Resolver;

/// Synchronous DNS resolver using the system configuration by default.
///
/// Names are queried as fully qualified names so that search domains from
/// `resolv.conf` never turn a typo into a match.
pub struct HickoryResolver {
    resolver: Resolver,
}

impl HickoryResolver {
    /// Creates a resolver from the system configuration (`/etc/resolv.conf` on Unix).
    pub fn from_system_conf() -> Result<Self> {
        let resolver = Resolver::from_system_conf().map_err(|e| ConfigError::SourceError {
            source_name: "dns".to_string(),
            message: "Failed to read system resolver configuration".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(Self { resolver })
    }

    /// Creates a resolver with an explicit configuration.
    pub fn new(config: ResolverConfig, opts: ResolverOpts) -> Result<Self> {
        let resolver = Resolver::new(config, opts).map_err(|e| ConfigError::SourceError {
            source_name: "dns".to_string(),
            message: "Failed to create resolver".to_string(),
            source: Some(Box::new(e)),
        })?;
        Ok(Self { resolver })
    }
}

fn fully_qualified(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

fn dns_error(name: &str, err: ResolveError) -> ConfigError {
    ConfigError::DnsError {
        name: name.to_string(),
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

impl DnsResolver for HickoryResolver {
    fn domain_exists(&self, domain: &str) -> Result<bool> {
        match self.resolver.lookup(fully_qualified(domain), RecordType::A) {
            Ok(_) => Ok(true),
            Err(err) => {
                let exists = match err.kind() {
                    // NOERROR without answers: the name exists, it just has no A record
                    ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                        Some(*response_code == ResponseCode::NoError)
                    }
                    _ => None,
                };
                exists.ok_or_else(|| dns_error(domain, err))
            }
        }
    }

    fn txt_records(&self, name: &str) -> Result<Vec<String>> {
        let lookup = self
            .resolver
            .txt_lookup(fully_qualified(name))
            .map_err(|e| dns_error(name, e))?;

        let records = lookup
            .iter()
            .map(|txt| {
                let bytes: Vec<u8> = txt
                    .txt_data()
                    .iter()
                    .flat_map(|chunk| chunk.iter().copied())
                    .collect();
                String::from_utf8_lossy(&bytes).into_owned()
            })
            .collect::<Vec<_>>();

        tracing::debug!("Found {} TXT record(s) at {}", records.len(), name);
        Ok(records)
    }
}
