//! Routing table snapshots.
//!
//! A `RoutingTable` is built once from configuration and never mutated.
//! Reloads build a new one and publish it through [`SharedTable`]; requests
//! load the current `Arc` once and keep it until they finish.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::http::Method;

use crate::config::schema::ServiceConfig;
use crate::routing::matcher::{match_route, RouteMatch};
use crate::routing::route::Route;

/// Handle shared between the server (readers) and the reload controller (writer).
pub type SharedTable = Arc<ArcSwap<RoutingTable>>;

/// An ordered, immutable set of routes.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: Vec<Route>,
    generation: u64,
}

impl RoutingTable {
    /// Compile services in configuration order.
    pub fn from_config(services: &[ServiceConfig], generation: u64) -> Self {
        let routes = services
            .iter()
            .enumerate()
            .map(|(i, service)| {
                let route = Route::from_config(service);
                if service.active && !route.active {
                    tracing::warn!(
                        index = i + 1,
                        backend = %route.backend,
                        "Service has no usable path or prefix, treating as inactive"
                    );
                }
                route
            })
            .collect();

        Self { routes, generation }
    }

    pub fn new(routes: Vec<Route>, generation: u64) -> Self {
        Self { routes, generation }
    }

    /// Wrap this table in a handle for sharing.
    pub fn into_shared(self) -> SharedTable {
        Arc::new(ArcSwap::from_pointee(self))
    }

    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        match_route(&self.routes, method, path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.routes.iter().filter(|r| r.active).count()
    }
}

/// Log one line per configured service.
pub fn log_route_listing(services: &[ServiceConfig]) {
    tracing::info!(count = services.len(), "Loaded services");
    for (i, service) in services.iter().enumerate() {
        tracing::info!(
            "  {}. {} => {}:{}{}",
            i + 1,
            service.label(),
            service.backend_host,
            service.backend_port,
            if service.active { "" } else { " (inactive)" }
        );
    }
}
