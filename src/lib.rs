//! Siren Asset Proxy Library

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod relay;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
