//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the asset proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream provider settings (API base, identification, trust).
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Upstream content-provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL for the metadata API (songs, albums, lyrics indexes).
    pub api_base: String,

    /// User-Agent sent on every outbound request. The CDN rejects
    /// non-browser agents for some assets.
    pub user_agent: String,

    /// Skip upstream certificate validation. The provider's CDN serves a
    /// certificate that fails standard validation; this relaxation is
    /// deliberate and scoped to the outbound client only.
    pub accept_invalid_certs: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: "https://monster-siren.hypergryph.com/api".to_string(),
            user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            accept_invalid_certs: true,
        }
    }
}

/// Timeout configuration for outbound operations.
///
/// The probe budget is deliberately shorter than the stream budget: a
/// metadata-only HEAD must not dominate latency for clients that never
/// issue range requests, while a full media transfer can legitimately
/// run for tens of seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total timeout for the metadata probe (HEAD) in seconds.
    pub probe_secs: u64,

    /// Total timeout for JSON/text/byte pass-through fetches in seconds.
    pub metadata_secs: u64,

    /// Total timeout for font asset fetches in seconds. Fonts come off the
    /// same slow CDN path as media, so they get a stream-sized budget.
    pub font_secs: u64,

    /// Connect timeout for streaming fetches in seconds.
    pub stream_connect_secs: u64,

    /// Per-read timeout for streaming fetches in seconds. Bounds the gap
    /// between successive upstream chunks, not the whole transfer.
    pub stream_read_secs: u64,

    /// Inbound time-to-response-headers budget in seconds. Body streaming
    /// is not bounded by this.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_secs: 10,
            metadata_secs: 10,
            font_secs: 30,
            stream_connect_secs: 10,
            stream_read_secs: 60,
            request_secs: 30,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Address for the metrics endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}
