//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics and returns every
//! problem it finds, not just the first. Validation is a pure function of the
//! decoded configuration and runs before a configuration is accepted, both at
//! startup and on reload.

use axum::http::uri::Authority;
use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, ServiceConfig};
use crate::routing::route::parse_method;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service #{index}: backend port must be between 1 and 65535")]
    BackendPort { index: usize },

    #[error("service #{index}: invalid backend host {host:?}")]
    BackendHost { index: usize, host: String },

    #[error("service #{index}: unsupported method {method:?}")]
    Method { index: usize, method: String },

    #[error("service #{index}: {field} {value:?} must start with '/'")]
    RelativePath {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("service #{index}: unreachable, needs a prefix or a path with a method")]
    Unreachable { index: usize },

    #[error("health path {0:?} must start with '/'")]
    HealthPath(String),

    #[error("invalid client ip header name {0:?}")]
    ClientIpHeader(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a decoded configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, service) in config.services.iter().enumerate() {
        validate_service(index + 1, service, config.strict_routes, &mut errors);
    }

    if !config.server.health_path.starts_with('/') {
        errors.push(ValidationError::HealthPath(config.server.health_path.clone()));
    }
    if HeaderName::from_bytes(config.server.client_ip_header.as_bytes()).is_err() {
        errors.push(ValidationError::ClientIpHeader(
            config.server.client_ip_header.clone(),
        ));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether a service can ever be selected by the matcher.
pub fn is_reachable(service: &ServiceConfig) -> bool {
    service.prefix.is_some() || (service.exact_path.is_some() && service.method.is_some())
}

fn validate_service(
    index: usize,
    service: &ServiceConfig,
    strict: bool,
    errors: &mut Vec<ValidationError>,
) {
    if service.backend_port == 0 {
        errors.push(ValidationError::BackendPort { index });
    }

    let authority = format!("{}:{}", service.backend_host, service.backend_port);
    if service.backend_host.is_empty() || authority.parse::<Authority>().is_err() {
        errors.push(ValidationError::BackendHost {
            index,
            host: service.backend_host.clone(),
        });
    }

    if let Some(method) = &service.method {
        if parse_method(method).is_none() {
            errors.push(ValidationError::Method {
                index,
                method: method.clone(),
            });
        }
    }

    for (field, value) in [("path", &service.exact_path), ("prefix", &service.prefix)] {
        if let Some(value) = value {
            if !value.starts_with('/') {
                errors.push(ValidationError::RelativePath {
                    index,
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    if strict && !is_reachable(service) {
        errors.push(ValidationError::Unreachable { index });
    }
}
