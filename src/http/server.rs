//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Build the Axum router with tracing and request-id middleware
//! - Answer the health path before any routing
//! - Match against the current routing table snapshot
//! - Delegate matched requests to the forwarder, 404 the rest

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::HeaderName,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, GatewayConfig, ValidationError};
use crate::http::forward::{ForwardSettings, Forwarder};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{healthy, not_found};
use crate::observability::metrics;
use crate::routing::{normalize_path, SharedTable};

/// Settings fixed for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub health_path: String,
    pub forward: ForwardSettings,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            health_path: "/__health".to_string(),
            forward: ForwardSettings::default(),
        }
    }
}

impl GatewaySettings {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let client_ip_header = HeaderName::from_bytes(config.server.client_ip_header.as_bytes())
            .map_err(|_| {
                ConfigError::Validation(vec![ValidationError::ClientIpHeader(
                    config.server.client_ip_header.clone(),
                )])
            })?;

        Ok(Self {
            health_path: normalize_path(&config.server.health_path).into_owned(),
            forward: ForwardSettings {
                connect_timeout: Duration::from_secs(config.timeouts.connect_secs),
                upstream_timeout: Duration::from_secs(config.timeouts.upstream_secs),
                client_ip_header,
                debug: config.debug,
            },
        })
    }
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub table: SharedTable,
    pub forwarder: Forwarder,
    pub health_path: Arc<str>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a server reading routes from `table`.
    pub fn new(settings: GatewaySettings, table: SharedTable) -> Self {
        let state = AppState {
            table,
            forwarder: Forwarder::new(settings.forward),
            health_path: Arc::from(settings.health_path),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Every method and path goes to the gateway handler.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(gateway_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The configured router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve connections until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Health check, then route lookup, then forward or 404.
async fn gateway_handler(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = normalize_path(request.uri().path()).into_owned();
    let request_id = request_id(request.headers()).to_owned();

    tracing::debug!(request_id = %request_id, method = %method, path = %path, "Request received");

    if path == state.health_path.as_ref() {
        tracing::debug!(request_id = %request_id, "Health check");
        metrics::record_local(200, "health");
        return healthy();
    }

    // one snapshot per request; a concurrent reload does not affect it
    let table = state.table.load_full();

    match table.match_route(&method, &path) {
        Some(matched) => {
            let route = matched.route();
            tracing::debug!(
                request_id = %request_id,
                kind = matched.kind(),
                backend = %route.backend,
                generation = table.generation(),
                "Route matched"
            );
            state.forwarder.forward(request, route, &path).await
        }
        None => {
            tracing::debug!(request_id = %request_id, method = %method, path = %path, "No route matched");
            metrics::record_local(404, "not_found");
            not_found()
        }
    }
}
