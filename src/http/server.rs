//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, CORS, inbound timeout, metrics)
//! - Construct the upstream clients and inject them via AppState
//! - Bind server to listener and serve with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::handlers;
use crate::observability::metrics;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub api_base: Arc<str>,
    pub probe_timeout: Duration,
    pub font_timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = UpstreamClient::new(&config.upstream, &config.timeouts)?;
        Ok(Self {
            client,
            api_base: config.upstream.api_base.clone().into(),
            probe_timeout: Duration::from_secs(config.timeouts.probe_secs),
            font_timeout: Duration::from_secs(config.timeouts.font_secs),
        })
    }
}

/// HTTP server for the asset proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the upstream TLS backend cannot be initialized.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/songs", get(handlers::songs))
            .route("/api/song/{cid}", get(handlers::song_detail))
            .route("/api/albums", get(handlers::albums))
            .route("/api/album/{cid}/detail", get(handlers::album_detail))
            .route("/api/lyrics/{*url}", get(handlers::lyrics))
            .route("/api/image", get(handlers::image))
            .route("/api/audio", get(handlers::audio))
            .route("/api/font", get(handlers::font))
            // route_layer so MatchedPath is populated when the middleware runs
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            // Bounds time-to-headers only; body streaming runs past it.
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record per-endpoint request metrics.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;

    metrics::record_request(&endpoint, response.status().as_u16(), start);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
