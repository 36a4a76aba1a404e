//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The listener bind address does not parse as host:port.
    InvalidBindAddress(String),
    /// The upstream manager host is empty.
    EmptyUpstreamHost,
    /// The upstream manager port is zero.
    ZeroUpstreamPort,
    /// A timeout is configured as zero.
    ZeroTimeout(&'static str),
    /// The metrics address does not parse as host:port.
    InvalidMetricsAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "listener.bind_address {:?} is not a valid socket address", addr)
            }
            ValidationError::EmptyUpstreamHost => write!(f, "upstream.host must not be empty"),
            ValidationError::ZeroUpstreamPort => write!(f, "upstream.port must not be zero"),
            ValidationError::ZeroTimeout(field) => write!(f, "timeouts.{} must not be zero", field),
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "observability.metrics_address {:?} is not a valid socket address", addr)
            }
        }
    }
}

/// Check a configuration for semantic problems, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.host.is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    }
    if config.upstream.port == 0 {
        errors.push(ValidationError::ZeroUpstreamPort);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.upstream_reply_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_reply_ms"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
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
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.host = String::new();
        config.upstream.port = 0;
        config.timeouts.upstream_reply_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyUpstreamHost));
        assert!(errors.contains(&ValidationError::ZeroUpstreamPort));
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream_reply_ms")));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidMetricsAddress("bogus".into())]
        );
    }
}
