//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values that would only fail later at
//! bind or connect time. Every problem is reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::StorefrontConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("database.{0} must not be empty")]
    EmptyDatabaseField(&'static str),

    #[error("database.port must be non-zero")]
    ZeroDatabasePort,

    #[error("database.pool_max_size must be at least 1")]
    ZeroPoolSize,

    #[error("listener address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("security.max_body_size must be non-zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &StorefrontConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let db = &config.database;

    if db.host.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseField("host"));
    }
    if db.name.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseField("name"));
    }
    if db.user.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseField("user"));
    }
    if db.port == 0 {
        errors.push(ValidationError::ZeroDatabasePort);
    }
    if db.pool_max_size == 0 {
        errors.push(ValidationError::ZeroPoolSize);
    }

    let bind = config.listener.bind_address();
    if bind.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(bind));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
