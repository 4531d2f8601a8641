// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) for every external
//! collaborator of the configurator: the section store, DNS, HTTP, the terminal
//! and the account tool. These traits are implemented by adapters in the
//! adapters layer.

pub mod account;
pub mod probe;
pub mod resolver;
pub mod store;
pub mod terminal;

// Re-export commonly used types
pub use account::AccountTool;
pub use probe::ReachabilityProbe;
pub use resolver::DnsResolver;
pub use store::ConfigStore;
pub use terminal::Terminal;
