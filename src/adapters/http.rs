// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP reachability probe adapter backed by `reqwest`.

use crate::domain::{ConfigError, Result};
use crate::ports::ReachabilityProbe;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Default timeout of a single probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe issuing a blocking `GET` with redirects disabled.
///
/// The response, including its status code, is discarded.
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    /// Creates a probe with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| ConfigError::SourceError {
                source_name: "http".to_string(),
                message: "Failed to create HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }
}

impl ReachabilityProbe for HttpProbe {
    fn probe(&self, url: &str) -> Result<()> {
        match self.client.get(url).send() {
            Ok(resp) => {
                tracing::debug!("{} answered with status {}", url, resp.status());
                Ok(())
            }
            Err(e) => Err(ConfigError::HttpError {
                url: url.to_string(),
                message: e.to_string(),
                source: Some(Box::new(e)),
            }),
        }
    }
}
