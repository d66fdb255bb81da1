//! Upstream metadata probing.
//!
//! # Responsibilities
//! - Learn a resource's total size and declared content type without
//!   transferring its body
//! - Distinguish "size unknown" (a valid outcome) from "upstream down"
//!
//! # Design Decisions
//! - A probe that reports no Content-Length does not fail the request; it
//!   simply forces full-stream mode downstream
//! - A non-success probe status is not escalated either: the follow-up GET
//!   surfaces it where it can be translated properly
//! - Only connect/DNS/TLS failure or timeout is an error

use std::time::Duration;

use reqwest::header;

use crate::error::ProxyError;
use crate::upstream::client::UpstreamClient;

/// Content type assumed when the probe does not declare one.
const DEFAULT_CONTENT_TYPE: &str = "audio/wav";

/// What the probe learned about an upstream resource.
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    /// The caller-supplied upstream URL.
    pub source_url: String,

    /// Total size in bytes, when upstream declared one. `None` disables
    /// range negotiation for this request.
    pub total_size: Option<u64>,

    /// Content type declared by the probe; the final fallback if a later
    /// fetch does not override it.
    pub declared_content_type: String,
}

/// Probe an upstream resource with a metadata-only HEAD request.
pub async fn probe(
    client: &UpstreamClient,
    url: &str,
    timeout: Duration,
) -> Result<ResourceDescriptor, ProxyError> {
    let response = client.head(url, timeout).await?;

    // A zero-length declaration is treated the same as no declaration:
    // there is nothing to negotiate a range against.
    let total_size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&n| n > 0);

    let declared_content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    tracing::debug!(
        url = %url,
        total_size = ?total_size,
        content_type = %declared_content_type,
        "Probed upstream resource"
    );

    Ok(ResourceDescriptor {
        source_url: url.to_string(),
        total_size,
        declared_content_type,
    })
}
