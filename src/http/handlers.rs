//! Request handlers.
//!
//! # Responsibilities
//! - The core audio relay: probe → negotiate → stream
//! - One-to-one pass-throughs for metadata, lyrics, images, fonts
//!
//! # Design Decisions
//! - Handlers return `Result<_, ProxyError>`; every pre-stream failure is
//!   converted to the JSON error body in one place
//! - An empty `url=` parameter is treated the same as an absent one

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::ProxyError;
use crate::http::fonts;
use crate::http::server::AppState;
use crate::relay::{negotiate, relay};
use crate::upstream::{metadata, probe};

/// Query shape for the asset endpoints (`?url=<absolute URL>`).
#[derive(Debug, Deserialize)]
pub struct AssetQuery {
    url: Option<String>,
}

impl AssetQuery {
    fn url(self) -> Result<String, ProxyError> {
        self.url
            .filter(|u| !u.is_empty())
            .ok_or(ProxyError::MissingUrl)
    }
}

/// `GET /api/audio?url=` — the streaming byte-range relay.
pub async fn audio(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    let url = query.url()?;

    let descriptor = probe(&state.client, &url, state.probe_timeout).await?;

    let range_header = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok());
    let mode = negotiate(range_header, descriptor.total_size);

    tracing::debug!(
        url = %url,
        range = ?range_header,
        mode = ?mode,
        "Negotiated delivery mode"
    );

    relay(&state.client, &descriptor, mode).await
}

/// `GET /api/image?url=` — buffered byte pass-through.
pub async fn image(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> Result<Response, ProxyError> {
    let url = query.url()?;
    let (body, content_type) = metadata::fetch_bytes(&state.client, &url, None).await?;
    let content_type = content_type.unwrap_or_else(|| "image/png".to_string());
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        body,
    )
        .into_response())
}

/// `GET /api/font?url=` — buffered pass-through, type resolved from the
/// URL extension, long-lived client caching.
pub async fn font(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> Result<Response, ProxyError> {
    let url = query.url()?;
    let (body, _) =
        metadata::fetch_bytes(&state.client, &url, Some(state.font_timeout)).await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, fonts::content_type_for(&url)),
            (header::CACHE_CONTROL, "public, max-age=31536000"),
        ],
        body,
    )
        .into_response())
}

/// `GET /api/songs` — provider song list.
pub async fn songs(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ProxyError> {
    let value = metadata::fetch_json(&state.client, &state.api_base, "songs").await?;
    Ok(Json(value))
}

/// `GET /api/song/{cid}` — single song detail.
pub async fn song_detail(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let path = format!("song/{}", cid);
    let value = metadata::fetch_json(&state.client, &state.api_base, &path).await?;
    Ok(Json(value))
}

/// `GET /api/albums` — provider album list.
pub async fn albums(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ProxyError> {
    let value = metadata::fetch_json(&state.client, &state.api_base, "albums").await?;
    Ok(Json(value))
}

/// `GET /api/album/{cid}/detail` — single album detail.
pub async fn album_detail(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<serde_json::Value>, ProxyError> {
    let path = format!("album/{}/detail", cid);
    let value = metadata::fetch_json(&state.client, &state.api_base, &path).await?;
    Ok(Json(value))
}

/// `GET /api/lyrics/{*url}` — lyrics file fetched as plain text.
pub async fn lyrics(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<Response, ProxyError> {
    let text = metadata::fetch_text(&state.client, &url).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        text,
    )
        .into_response())
}
