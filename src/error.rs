//! Error taxonomy for the proxy.
//!
//! # Responsibilities
//! - Classify failures: client mistakes vs upstream faults
//! - Convert every pre-stream error into a JSON `{"error": ...}` body
//!
//! # Design Decisions
//! - Missing parameters and content mismatches are 400s (the caller asked
//!   for something wrong), upstream faults are 500s
//! - Mid-stream failures never reach this type: once headers are committed
//!   the body simply truncates

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the proxy before any body byte is committed.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Required `url` query argument absent. No upstream call is attempted.
    #[error("Missing url parameter")]
    MissingUrl,

    /// DNS/connect/TLS failure or timeout reaching upstream.
    #[error("upstream request failed: {0}")]
    UpstreamUnreachable(#[from] reqwest::Error),

    /// Upstream answered a checked fetch with a non-success status.
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    /// Upstream served markup where binary media was expected. Usually an
    /// error page disguised as a 200.
    #[error("upstream returned {0} instead of media content")]
    ContentTypeMismatch(String),
}

impl ProxyError {
    /// HTTP status this error maps to at the request boundary.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingUrl => StatusCode::BAD_REQUEST,
            ProxyError::ContentTypeMismatch(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::UpstreamStatus(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_400() {
        assert_eq!(ProxyError::MissingUrl.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_content_mismatch_is_400() {
        let err = ProxyError::ContentTypeMismatch("text/html".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_is_500() {
        let err = ProxyError::UpstreamStatus(StatusCode::NOT_FOUND);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_url_message_shape() {
        assert_eq!(ProxyError::MissingUrl.to_string(), "Missing url parameter");
    }
}
