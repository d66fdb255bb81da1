//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the upstream API base is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(err(
            "listener.bind_address",
            format!("not a valid socket address: {}", config.listener.bind_address),
        ));
    }

    match Url::parse(&config.upstream.api_base) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        Ok(u) => errors.push(err(
            "upstream.api_base",
            format!("unsupported scheme: {}", u.scheme()),
        )),
        Err(e) => errors.push(err("upstream.api_base", format!("invalid URL: {}", e))),
    }

    let timeouts = [
        ("timeouts.probe_secs", config.timeouts.probe_secs),
        ("timeouts.metadata_secs", config.timeouts.metadata_secs),
        ("timeouts.font_secs", config.timeouts.font_secs),
        (
            "timeouts.stream_connect_secs",
            config.timeouts.stream_connect_secs,
        ),
        ("timeouts.stream_read_secs", config.timeouts.stream_read_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in timeouts {
        if value == 0 {
            errors.push(err(field, "must be greater than zero"));
        }
    }

    if config.timeouts.probe_secs > config.timeouts.stream_read_secs {
        errors.push(err(
            "timeouts.probe_secs",
            "probe budget must not exceed the stream read budget",
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(err(
            "observability.metrics_address",
            format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_bind_address_rejected() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "listener.bind_address"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ProxyConfig::default();
        config.timeouts.probe_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "timeouts.probe_secs"));
    }

    #[test]
    fn test_zero_font_budget_rejected() {
        let mut config = ProxyConfig::default();
        config.timeouts.font_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "timeouts.font_secs"));
    }

    #[test]
    fn test_font_budget_defaults_above_metadata_budget() {
        let config = ProxyConfig::default();
        assert!(config.timeouts.font_secs > config.timeouts.metadata_secs);
    }

    #[test]
    fn test_non_http_api_base_rejected() {
        let mut config = ProxyConfig::default();
        config.upstream.api_base = "ftp://example.com/api".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "upstream.api_base"));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "bogus".into();
        config.timeouts.metadata_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
