//! Compiled route definitions.

use std::fmt;

use axum::http::Method;

use crate::config::schema::ServiceConfig;
use crate::config::validation::is_reachable;
use crate::routing::matcher::normalize_path;

/// Methods accepted for exact-match routes.
const SUPPORTED_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

/// Parse a configured method name, case-insensitively.
pub fn parse_method(name: &str) -> Option<Method> {
    let upper = name.to_uppercase();
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
}

/// The single backend a route forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backend {
    pub host: String,
    pub port: u16,
}

impl Backend {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, used for the `host` header and the target URL.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `http://host:port`, used for the `origin` header.
    pub fn origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One entry of the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Exact path, matched together with `method`. Stored normalized.
    pub exact_path: Option<String>,
    /// Method for exact matches. Ignored by prefix matching.
    pub method: Option<Method>,
    /// Path prefix, matched for any method.
    pub prefix: Option<String>,
    pub backend: Backend,
    /// False when disabled in config or when the route can never match.
    pub active: bool,
}

impl Route {
    /// Compile a validated service definition.
    pub fn from_config(service: &ServiceConfig) -> Self {
        Self {
            // same form as the looked-up request path
            exact_path: service
                .exact_path
                .as_deref()
                .map(|path| normalize_path(path).into_owned()),
            method: service.method.as_deref().and_then(parse_method),
            prefix: service.prefix.clone(),
            backend: Backend::new(service.backend_host.clone(), service.backend_port),
            active: service.active && is_reachable(service),
        }
    }

    /// Exact rule: path and method both equal.
    pub fn matches_exact(&self, method: &Method, path: &str) -> bool {
        self.exact_path.as_deref() == Some(path) && self.method.as_ref() == Some(method)
    }

    /// Prefix rule: byte-wise, case-sensitive.
    pub fn matches_prefix(&self, path: &str) -> bool {
        self.prefix
            .as_deref()
            .is_some_and(|prefix| path.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get"), Some(Method::GET));
        assert_eq!(parse_method("Patch"), Some(Method::PATCH));
        assert_eq!(parse_method("BREW"), None);
    }

    #[test]
    fn test_unreachable_service_compiles_inactive() {
        let service = ServiceConfig {
            exact_path: Some("/only-path".into()),
            method: None,
            prefix: None,
            backend_host: "127.0.0.1".into(),
            backend_port: 4000,
            active: true,
        };
        let route = Route::from_config(&service);
        assert!(!route.active);
        assert_eq!(route.backend.authority(), "127.0.0.1:4000");
        assert_eq!(route.backend.origin(), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let route = Route {
            exact_path: None,
            method: None,
            prefix: Some("/Static".into()),
            backend: Backend::new("127.0.0.1", 5000),
            active: true,
        };
        assert!(route.matches_prefix("/Static/app.js"));
        assert!(!route.matches_prefix("/static/app.js"));
    }
}
