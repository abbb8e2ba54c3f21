//! Request forwarding to backends.
//!
//! # Responsibilities
//! - Build the target URL from the route's backend and the normalized path
//! - Sanitize and rewrite headers
//! - Stream request and response bodies without buffering
//! - Relay redirects untouched (the legacy client never follows them)
//! - Collapse every upstream failure into a plain 502
//!
//! When the client goes away hyper drops the handler future, which drops the
//! pending upstream call with it.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{HeaderName, Request, Uri};
use axum::response::Response;
use hyper::body::Incoming;
use hyper_util::client::legacy::{self, connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

use crate::http::headers;
use crate::http::response::bad_gateway;
use crate::observability::metrics;
use crate::routing::route::{Backend, Route};

/// Why a forward attempt failed. Only ever logged, never sent to the client.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("backend {backend} unreachable: {source}")]
    BackendUnreachable {
        backend: String,
        #[source]
        source: legacy::Error,
    },

    #[error("backend {backend} did not respond within {timeout:?}")]
    BackendTimeout { backend: String, timeout: Duration },

    #[error("backend {backend} protocol error: {source}")]
    BackendProtocolError {
        backend: String,
        #[source]
        source: legacy::Error,
    },

    #[error("cannot build request for backend {backend}: {reason}")]
    InvalidTarget { backend: String, reason: String },
}

impl ForwardError {
    /// Label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::BackendUnreachable { .. } => "unreachable",
            ForwardError::BackendTimeout { .. } => "timeout",
            ForwardError::BackendProtocolError { .. } => "protocol",
            ForwardError::InvalidTarget { .. } => "invalid_target",
        }
    }

    fn invalid_target(backend: &Backend, reason: impl ToString) -> Self {
        ForwardError::InvalidTarget {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Per-process forwarding settings.
#[derive(Debug, Clone)]
pub struct ForwardSettings {
    pub connect_timeout: Duration,
    pub upstream_timeout: Duration,
    pub client_ip_header: HeaderName,
    /// Log the full error structure on failures.
    pub debug: bool,
}

impl Default for ForwardSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            upstream_timeout: Duration::from_secs(30),
            client_ip_header: HeaderName::from_static("cf-connecting-ip"),
            debug: false,
        }
    }
}

/// Issues outbound requests for matched routes.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    settings: ForwardSettings,
}

impl Forwarder {
    pub fn new(settings: ForwardSettings) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(settings.connect_timeout));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self { client, settings }
    }

    /// Forward `request` to the route's backend and relay the answer.
    ///
    /// Always returns a response: backend failures become 502 `Bad Gateway`.
    pub async fn forward(&self, request: Request<Body>, route: &Route, path: &str) -> Response {
        let start = Instant::now();
        let backend = &route.backend;

        match self.try_forward(request, backend, path).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    backend = %backend,
                    status = status.as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Forward succeeded"
                );
                metrics::record_forward(status.as_u16(), "forwarded", start);
                response
            }
            Err(e) => {
                tracing::error!(
                    backend = %backend,
                    path = %path,
                    kind = e.kind(),
                    error = %e,
                    "Forward failed"
                );
                if self.settings.debug {
                    tracing::debug!(error = ?e, "Forward failure detail");
                }
                metrics::record_forward(502, e.kind(), start);
                bad_gateway()
            }
        }
    }

    async fn try_forward(
        &self,
        request: Request<Body>,
        backend: &Backend,
        path: &str,
    ) -> Result<Response, ForwardError> {
        let (parts, body) = request.into_parts();

        let target = target_uri(backend, path, parts.uri.query())
            .map_err(|e| ForwardError::invalid_target(backend, e))?;

        let client_ip = headers::client_ip(&parts.headers, &self.settings.client_ip_header);
        let outbound_headers =
            headers::rewrite_for_backend(headers::sanitize(&parts.headers), backend, &client_ip)
                .map_err(|e| ForwardError::invalid_target(backend, e))?;

        tracing::debug!(method = %parts.method, target = %target, "Forwarding request");

        let mut outbound = Request::builder()
            .method(parts.method)
            .uri(target)
            .body(body)
            .map_err(|e| ForwardError::invalid_target(backend, e))?;
        *outbound.headers_mut() = outbound_headers;

        let timeout = self.settings.upstream_timeout;
        let response: hyper::Response<Incoming> =
            match tokio::time::timeout(timeout, self.client.request(outbound)).await {
                Ok(Ok(response)) => response,
                Ok(Err(source)) if source.is_connect() => {
                    return Err(ForwardError::BackendUnreachable {
                        backend: backend.to_string(),
                        source,
                    })
                }
                Ok(Err(source)) => {
                    return Err(ForwardError::BackendProtocolError {
                        backend: backend.to_string(),
                        source,
                    })
                }
                Err(_) => {
                    return Err(ForwardError::BackendTimeout {
                        backend: backend.to_string(),
                        timeout,
                    })
                }
            };

        // status, reason phrase extension and headers pass through as-is
        let (mut parts, body) = response.into_parts();
        headers::strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// `http://{host}:{port}{path}{?query}`
pub fn target_uri(
    backend: &Backend,
    path: &str,
    query: Option<&str>,
) -> Result<Uri, axum::http::uri::InvalidUri> {
    let uri = match query {
        Some(query) => format!("http://{}{}?{}", backend.authority(), path, query),
        None => format!("http://{}{}", backend.authority(), path),
    };
    uri.parse()
}
