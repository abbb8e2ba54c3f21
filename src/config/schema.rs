//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from JSON or TOML files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen host (e.g., "0.0.0.0").
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// Debug mode: verbose logging and detailed forward failure reports.
    pub debug: bool,

    /// Reject unreachable services instead of loading them as inactive.
    pub strict_routes: bool,

    /// Service definitions, in matching order.
    pub services: Vec<ServiceConfig>,

    /// Request handling settings.
    pub server: ServerConfig,

    /// Upstream timeouts.
    pub timeouts: TimeoutConfig,

    /// Reload trigger settings.
    pub reload: ReloadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            debug: false,
            strict_routes: false,
            services: Vec::new(),
            server: ServerConfig::default(),
            timeouts: TimeoutConfig::default(),
            reload: ReloadConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// The `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// One backend service and the rule that selects it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Exact path to match (together with `method`).
    #[serde(default, alias = "path", skip_serializing_if = "Option::is_none")]
    pub exact_path: Option<String>,

    /// HTTP method for exact matches. Case-insensitive in the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Path prefix to match, any method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Backend host name or address.
    #[serde(alias = "host")]
    pub backend_host: String,

    /// Backend port.
    #[serde(alias = "port")]
    pub backend_port: u16,

    /// Whether the service takes part in matching.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ServiceConfig {
    /// Short description used in the route listing.
    pub fn label(&self) -> String {
        match (&self.exact_path, &self.prefix) {
            (Some(path), _) => format!(
                "path: {} {}",
                self.method.as_deref().unwrap_or("<any>").to_uppercase(),
                path
            ),
            (None, Some(prefix)) => format!("prefix: {}", prefix),
            (None, None) => "<no path or prefix>".to_string(),
        }
    }
}

/// Request handling settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path answered by the gateway itself, before routing.
    pub health_path: String,

    /// Header injected by a trusted edge carrying the real client address.
    pub client_ip_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            health_path: "/__health".to_string(),
            client_ip_header: "cf-connecting-ip".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for the backend to produce response headers, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Reload trigger configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Accept the `r` command on stdin.
    pub stdin_commands: bool,

    /// Reload automatically when the config file changes.
    pub watch: bool,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            stdin_commands: true,
            watch: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Prometheus endpoint bind address. Disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            metrics_address: None,
        }
    }
}
