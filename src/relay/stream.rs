//! Streaming relay.
//!
//! # Responsibilities
//! - Open the upstream byte stream (full or range-restricted)
//! - Assemble status and framing headers for both delivery modes
//! - Forward the body chunk-by-chunk without buffering the resource
//! - Translate pre-stream upstream failures; truncate on mid-stream ones
//!
//! # Design Decisions
//! - Bodies are pull-based: a slow client throttles the upstream read, and
//!   a disconnected client drops the stream, which releases the upstream
//!   connection within one chunk-read cycle
//! - Upstream chunks larger than CHUNK_SIZE are split so memory stays
//!   O(chunk), never O(resource)
//! - The live Content-Type is only sanity-checked in Full mode; once the
//!   probe has reported a concrete size, the ranged fetch is trusted

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};

use crate::error::ProxyError;
use crate::relay::range::{ByteRange, StreamMode};
use crate::upstream::client::UpstreamClient;
use crate::upstream::probe::ResourceDescriptor;

/// Fixed relay chunk bound, shared by both delivery modes.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Stream an upstream resource to the client in the negotiated mode.
pub async fn relay(
    client: &UpstreamClient,
    descriptor: &ResourceDescriptor,
    mode: StreamMode,
) -> Result<Response, ProxyError> {
    match (mode, descriptor.total_size) {
        (StreamMode::Partial(range), Some(total)) => {
            relay_partial(client, descriptor, range, total).await
        }
        // Partial without a known size cannot be framed; the negotiator
        // never produces it, but degrade to Full rather than panic.
        _ => relay_full(client, descriptor).await,
    }
}

/// Full-stream delivery: status 200, entire body.
async fn relay_full(
    client: &UpstreamClient,
    descriptor: &ResourceDescriptor,
) -> Result<Response, ProxyError> {
    let upstream = client.stream_get(&descriptor.source_url, None).await?;

    let status = upstream.status();
    if !status.is_success() {
        return Err(ProxyError::UpstreamStatus(
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
        ));
    }

    // The live type overrides the probed one. An HTML payload here means
    // the CDN served an error page behind a 200; refuse to forward it.
    let live_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(&descriptor.declared_content_type)
        .to_string();
    if live_type.contains("text/html") {
        return Err(ProxyError::ContentTypeMismatch(live_type));
    }

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type_value(&live_type));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    if let Some(total) = descriptor.total_size {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(total));
    }

    tracing::debug!(
        url = %descriptor.source_url,
        content_type = %live_type,
        total_size = ?descriptor.total_size,
        "Relaying full stream"
    );

    Ok((StatusCode::OK, headers, chunked_body(upstream)).into_response())
}

/// Partial delivery: status 206, negotiated window only.
async fn relay_partial(
    client: &UpstreamClient,
    descriptor: &ResourceDescriptor,
    range: ByteRange,
    total: u64,
) -> Result<Response, ProxyError> {
    let upstream = client
        .stream_get(&descriptor.source_url, Some(&range.to_header_value()))
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        content_type_value(&descriptor.declared_content_type),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(range.len()));
    headers.insert(
        header::CONTENT_RANGE,
        content_range_value(&range, total),
    );
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));

    tracing::debug!(
        url = %descriptor.source_url,
        start = range.start,
        end = range.end,
        total = total,
        "Relaying partial stream"
    );

    Ok((StatusCode::PARTIAL_CONTENT, headers, chunked_body(upstream)).into_response())
}

/// Wrap an upstream response as a lazy chunk-bounded body.
///
/// A mid-stream upstream error is logged and propagated as a terminal
/// stream item; hyper closes the connection and the client sees a
/// truncated body. Headers are already committed at that point, so no
/// status can be reported.
fn chunked_body(upstream: reqwest::Response) -> Body {
    let url = upstream.url().to_string();
    let stream = upstream.bytes_stream().flat_map(move |item| {
        let pieces: Vec<Result<Bytes, reqwest::Error>> = match item {
            Ok(mut buf) => {
                let mut out = Vec::with_capacity(buf.len() / CHUNK_SIZE + 1);
                while buf.len() > CHUNK_SIZE {
                    out.push(Ok(buf.split_to(CHUNK_SIZE)));
                }
                if !buf.is_empty() {
                    out.push(Ok(buf));
                }
                out
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Upstream failed mid-stream; truncating body");
                vec![Err(e)]
            }
        };
        stream::iter(pieces)
    });
    Body::from_stream(stream)
}

fn content_type_value(content_type: &str) -> HeaderValue {
    HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

fn content_range_value(range: &ByteRange, total: u64) -> HeaderValue {
    let rendered = format!("bytes {}-{}/{}", range.start, range.end, total);
    HeaderValue::from_str(&rendered)
        .unwrap_or_else(|_| HeaderValue::from_static("bytes */0"))
}
