// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter running the `mai` command-line tool.

use crate::domain::{ConfigError, Result};
use crate::ports::AccountTool;
use std::process::Command;

/// Runs `mai create-all --url <identity provider>` to set up AWS profiles.
#[derive(Debug, Clone)]
pub struct MaiCommand {
    program: String,
}

impl MaiCommand {
    /// Uses `mai` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("mai")
    }

    /// Uses a specific executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MaiCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountTool for MaiCommand {
    fn create_all(&self, identity_provider_url: &str) -> Result<bool> {
        let status = Command::new(&self.program)
            .args(["create-all", "--url", identity_provider_url])
            .status()
            .map_err(|e| ConfigError::CommandError {
                command: self.program.clone(),
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        tracing::debug!("{} create-all exited with {}", self.program, status);
        Ok(status.success())
    }
}
