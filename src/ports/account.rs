// SPDX-License-Identifier: MIT OR Apache-2.0

//! External account-configuration tool trait definition.

use crate::domain::Result;

/// A trait for the external tool that sets up cloud account profiles.
pub trait AccountTool {
    /// Runs the tool against the given identity provider.
    ///
    /// Returns `Ok(true)` when the tool exits successfully, `Ok(false)` on a
    /// non-zero exit and `Err` when it could not be started.
    fn create_all(&self, identity_provider_url: &str) -> Result<bool>;
}
