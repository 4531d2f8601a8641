// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive bootstrap of STUPS command-line tool configuration.
//!
//! This crate discovers organization-specific service endpoints through DNS TXT
//! records, checks that they answer over HTTPS and writes one YAML
//! configuration section per tool, ready for sibling command-line tools to read.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`Section`, `SectionName`, `DomainName`, `AutoConfig`, errors)
//! - **Ports**: Trait definitions for every collaborator (`ConfigStore`, `DnsResolver`,
//!   `ReachabilityProbe`, `Terminal`, `AccountTool`)
//! - **Adapters**: Implementations backed by YAML files, environment variables,
//!   `hickory-resolver`, `reqwest`, the terminal and the `mai` executable
//! - **Service**: The `DomainConfigurator` that runs the interactive flow
//!
//! # Configuration sections
//!
//! Each section lives at `<platform config dir>/<section>/<section>.yaml`. Any
//! environment variable named `<SECTION>_<KEY>` (section uppercased, dashes as
//! underscores) overrides `<key>` at load time.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stups_config::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let store = YamlFileStore::from_default_location()?;
//! let pierone = store.load(&SectionName::from("pierone"));
//! println!("Pier One URL: {:?}", pierone.get("url"));
//!
//! let mut configurator = DomainConfigurator::builder().build()?;
//! configurator.configure(None)?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{
        ConsoleTerminal, EnvVarAdapter, HickoryResolver, HttpProbe, MaiCommand, YamlFileStore,
    };
    pub use crate::domain::{AutoConfig, ConfigError, DomainName, Result, Section, SectionName};
    pub use crate::ports::{AccountTool, ConfigStore, DnsResolver, ReachabilityProbe, Terminal};
    pub use crate::service::{
        AttemptReport, ConfiguratorSettings, DomainConfigurator, DomainConfiguratorBuilder,
        ProbeTarget,
    };
}
