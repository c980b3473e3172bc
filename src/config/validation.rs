//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts > 0)
//! - Check that listener addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - A missing or empty pool is NOT a validation error; the dispatcher
//!   reports it per request so the service stays up and explains itself

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;
use crate::load_balancer::pool::split_pool;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),

    #[error("upstreams.attempt_timeout_ms must be greater than zero")]
    ZeroAttemptTimeout,

    #[error("upstreams.max_attempts must be greater than zero")]
    ZeroMaxAttempts,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a loaded configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.upstreams.attempt_timeout_ms == 0 {
        errors.push(ValidationError::ZeroAttemptTimeout);
    }
    if config.upstreams.max_attempts == 0 {
        errors.push(ValidationError::ZeroMaxAttempts);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Log pool entries that will not parse as absolute URLs.
///
/// These are still forwarded verbatim; the attempt will fail as a transport
/// error and the dispatcher moves on.
pub fn warn_suspicious_upstreams(config: &ProxyConfig) {
    let Some(raw) = config.upstreams.pool.as_deref() else {
        return;
    };
    for entry in split_pool(raw) {
        if let Err(e) = Url::parse(&entry) {
            tracing::warn!(upstream = %entry, error = %e, "Pool entry is not an absolute URL");
        }
    }
}
