// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing port implementations.
//!
//! This module contains the concrete implementations of the traits defined in the
//! ports layer: YAML files and environment variables for the section store, DNS
//! and HTTP for probing, a line-oriented terminal and the `mai` subprocess.

pub mod dns;
pub mod env_var;
pub mod http;
pub mod mai;
pub mod terminal;
pub mod yaml_file;

pub use dns::HickoryResolver;
pub use env_var::EnvVarAdapter;
pub use http::{HttpProbe, DEFAULT_PROBE_TIMEOUT};
pub use mai::MaiCommand;
pub use terminal::ConsoleTerminal;
pub use yaml_file::YamlFileStore;
