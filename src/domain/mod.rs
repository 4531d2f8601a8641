// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the core domain types for the configurator: section names
//! and contents, domain candidates, autodiscovered payloads and errors. It is
//! independent of any filesystem, network or terminal concerns.

pub mod autoconfig;
pub mod domain_name;
pub mod errors;
pub mod section;
pub mod section_name;

// Re-export commonly used types
pub use autoconfig::AutoConfig;
pub use domain_name::DomainName;
pub use errors::{ConfigError, Result};
pub use section::Section;
pub use section_name::SectionName;
