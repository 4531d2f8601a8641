// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the domain configurator.
//!
//! This module ties the ports together into the interactive bootstrap flow and
//! holds the settings that parameterize it.

pub mod configurator;
pub mod settings;

// Re-export commonly used types
pub use configurator::{AttemptReport, DomainConfigurator, DomainConfiguratorBuilder};
pub use settings::{ConfiguratorSettings, ProbeTarget};
