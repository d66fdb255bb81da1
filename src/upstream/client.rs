//! Shared upstream HTTP clients.
//!
//! # Responsibilities
//! - Build the outbound reqwest clients once at startup
//! - Apply the browser-like User-Agent and the certificate trust relaxation
//! - Enforce the two timeout budgets (short metadata, long stream)
//!
//! # Design Decisions
//! - Two clients, not one: the metadata client carries a total-request
//!   timeout, the stream client only bounds connect time and the gap
//!   between reads so large transfers are never cut off mid-body
//! - Constructed explicitly and injected through AppState; no globals

use std::time::Duration;

use crate::config::{TimeoutConfig, UpstreamConfig};

/// Outbound HTTP clients for the content provider.
#[derive(Clone)]
pub struct UpstreamClient {
    metadata: reqwest::Client,
    stream: reqwest::Client,
}

impl UpstreamClient {
    /// Build both clients from configuration.
    pub fn new(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, reqwest::Error> {
        let metadata = reqwest::Client::builder()
            .user_agent(upstream.user_agent.clone())
            .danger_accept_invalid_certs(upstream.accept_invalid_certs)
            .timeout(Duration::from_secs(timeouts.metadata_secs))
            .build()?;

        let stream = reqwest::Client::builder()
            .user_agent(upstream.user_agent.clone())
            .danger_accept_invalid_certs(upstream.accept_invalid_certs)
            .connect_timeout(Duration::from_secs(timeouts.stream_connect_secs))
            .read_timeout(Duration::from_secs(timeouts.stream_read_secs))
            .build()?;

        Ok(Self { metadata, stream })
    }

    /// Issue a HEAD request with the probe budget.
    pub async fn head(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.metadata.head(url).timeout(timeout).send().await
    }

    /// Issue a plain GET with the metadata budget.
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.metadata.get(url).send().await
    }

    /// Issue a plain GET with an explicit total budget instead of the
    /// metadata default.
    pub async fn get_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.metadata.get(url).timeout(timeout).send().await
    }

    /// Issue a streaming GET, optionally range-restricted.
    pub async fn stream_get(
        &self,
        url: &str,
        range: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut req = self.stream.get(url);
        if let Some(range) = range {
            req = req.header(reqwest::header::RANGE, range);
        }
        req.send().await
    }
}
