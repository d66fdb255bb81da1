//! Configuration subsystem.
//!
//! # Responsibilities
//! - Define the configuration schema (schema.rs)
//! - Load configuration from TOML files (loader.rs)
//! - Validate semantic correctness (validation.rs)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, ProxyConfig, TimeoutConfig, UpstreamConfig,
};
