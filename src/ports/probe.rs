// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reachability probe trait definition.

use crate::domain::Result;

/// A trait for liveness checks against component URLs.
///
/// Only transport-level failure counts. Any HTTP response, whatever its status,
/// means the URL is reachable.
pub trait ReachabilityProbe {
    /// Probes `url`, returning `Err` if no response could be obtained.
    fn probe(&self, url: &str) -> Result<()>;
}
