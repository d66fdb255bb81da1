//! Shared helpers for integration tests: a programmable mock upstream and
//! a proxy instance bound to an ephemeral port.
#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures_util::stream::{self, StreamExt};
use serde_json::json;
use tokio::net::TcpListener;

use siren_proxy::config::ProxyConfig;
use siren_proxy::http::HttpServer;

pub const MEDIA_SIZE: usize = 1000;

/// Deterministic fake media payload shared by the mock and the asserts.
pub fn media_bytes() -> Bytes {
    Bytes::from((0..MEDIA_SIZE).map(|i| (i % 251) as u8).collect::<Vec<u8>>())
}

/// Start the mock upstream on an ephemeral port and return its address.
pub async fn start_mock_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/media.wav", get(media))
        .route("/nolength", get(no_length))
        .route("/flaky", get(flaky))
        .route("/page.html", get(html_page))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/songs", get(|| async { Json(json!({ "list": [{ "cid": "1", "name": "one" }] })) }))
        .route(
            "/album/{cid}/detail",
            get(|axum::extract::Path(cid): axum::extract::Path<String>| async move {
                Json(json!({ "cid": cid, "songs": [] }))
            }),
        )
        .route(
            "/lyrics.txt",
            get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "line one\nline two") }),
        )
        .route("/cover", get(untyped_bytes))
        .route("/font.woff2", get(untyped_bytes))
        .with_state(media_bytes());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start the proxy against the given API base and return its address.
pub async fn start_proxy(api_base: String) -> SocketAddr {
    let mut config = ProxyConfig::default();
    config.upstream.api_base = api_base;
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });
    addr
}

/// Sized media resource. HEAD reports the full length; GET honors a
/// `bytes=<start>-<end>` range the way a well-behaved CDN does.
async fn media(State(media): State<Bytes>, method: Method, headers: HeaderMap) -> Response {
    if method == Method::HEAD {
        return Response::builder()
            .header(header::CONTENT_TYPE, "audio/wav")
            .header(header::CONTENT_LENGTH, media.len())
            .body(Body::empty())
            .unwrap();
    }

    if let Some(range) = headers.get(header::RANGE).and_then(|v| v.to_str().ok()) {
        let (start, end) = parse_range(range, media.len() as u64);
        let slice = media.slice(start as usize..=end as usize);
        return Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_TYPE, "audio/wav")
            .header(header::CONTENT_LENGTH, slice.len())
            .header(
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", start, end, media.len()),
            )
            .body(Body::from(slice))
            .unwrap();
    }

    ([(header::CONTENT_TYPE, "audio/wav")], media).into_response()
}

/// Resource whose connection drops partway through the body: declares the
/// full media length but fails after the first 100 bytes.
async fn flaky(State(media): State<Bytes>, method: Method) -> Response {
    if method == Method::HEAD {
        return Response::builder()
            .header(header::CONTENT_TYPE, "audio/wav")
            .header(header::CONTENT_LENGTH, media.len())
            .body(Body::empty())
            .unwrap();
    }

    let prefix = media.slice(..100);
    // Yield between the prefix and the error so hyper flushes the committed
    // headers and prefix to the wire before the connection is torn down.
    let body = Body::from_stream(
        stream::iter(vec![
            Ok(prefix),
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "upstream reset",
            )),
        ])
        .then(|item| async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            item
        }),
    );
    Response::builder()
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, media.len())
        .body(body)
        .unwrap()
}

/// Resource that never declares a Content-Length (chunked transfer).
async fn no_length(State(media): State<Bytes>) -> Response {
    let body = Body::from_stream(stream::iter(vec![Ok::<_, Infallible>(media)]));
    ([(header::CONTENT_TYPE, "audio/wav")], body).into_response()
}

/// A CDN error page served behind a 200.
async fn html_page() -> Response {
    (
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>not the droids</body></html>",
    )
        .into_response()
}

/// Bytes with no Content-Type header at all.
async fn untyped_bytes(State(media): State<Bytes>) -> Response {
    Response::builder()
        .body(Body::from(media.slice(..64)))
        .unwrap()
}

fn parse_range(header: &str, total: u64) -> (u64, u64) {
    let spec = header.trim_start_matches("bytes=");
    let (start, end) = spec.split_once('-').unwrap();
    let start: u64 = start.parse().unwrap();
    let end: u64 = if end.is_empty() {
        total - 1
    } else {
        end.parse().unwrap()
    };
    (start, end.min(total - 1))
}
