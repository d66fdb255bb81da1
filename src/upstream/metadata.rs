//! Metadata pass-through fetches.
//!
//! # Responsibilities
//! - One-to-one relays for the provider's JSON endpoints (songs, albums)
//! - Text fetch for lyrics files, buffered byte fetch for images and fonts
//!
//! # Design Decisions
//! - All fetches share the short metadata timeout; none of these bodies
//!   is large enough to justify streaming
//! - Non-success upstream statuses are errors here, unlike the probe

use std::time::Duration;

use axum::http::StatusCode;
use bytes::Bytes;

use crate::error::ProxyError;
use crate::upstream::client::UpstreamClient;

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProxyError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProxyError::UpstreamStatus(
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
        ))
    }
}

/// Fetch a provider API path (relative to the configured base) as JSON.
pub async fn fetch_json(
    client: &UpstreamClient,
    api_base: &str,
    path: &str,
) -> Result<serde_json::Value, ProxyError> {
    let url = format!("{}/{}", api_base.trim_end_matches('/'), path);
    let response = check_status(client.get(&url).await?)?;
    Ok(response.json().await?)
}

/// Fetch an arbitrary URL as text (lyrics files).
pub async fn fetch_text(client: &UpstreamClient, url: &str) -> Result<String, ProxyError> {
    let response = check_status(client.get(url).await?)?;
    Ok(response.text().await?)
}

/// Fetch an arbitrary URL fully buffered, returning the body and the
/// upstream Content-Type when it declared one.
///
/// `timeout` overrides the metadata budget for asset classes that need a
/// longer one (fonts).
pub async fn fetch_bytes(
    client: &UpstreamClient,
    url: &str,
    timeout: Option<Duration>,
) -> Result<(Bytes, Option<String>), ProxyError> {
    let response = match timeout {
        Some(t) => client.get_with_timeout(url, t).await?,
        None => client.get(url).await?,
    };
    let response = check_status(response)?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?;
    Ok((body, content_type))
}
