//! Routing table hot reload.
//!
//! The controller is the only writer of the shared table. A reload reads and
//! validates the configuration source, builds a complete new table, and
//! publishes it with one `ArcSwap::store`. Any failure leaves the current
//! table in place.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{ConfigError, ConfigSource, GatewayConfig};
use crate::observability::metrics;
use crate::routing::table::{log_route_listing, RoutingTable, SharedTable};

/// Outcome of a successful reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    pub generation: u64,
    pub routes: usize,
    pub active_routes: usize,
}

/// Rebuilds and swaps the routing table on demand.
pub struct ReloadController {
    source: Box<dyn ConfigSource>,
    table: SharedTable,
    /// Configuration the process started with. Also serializes reloads.
    baseline: Mutex<GatewayConfig>,
}

impl ReloadController {
    /// Build the first table (generation 1) from the startup configuration.
    pub fn new(source: impl ConfigSource + 'static, startup: GatewayConfig) -> Self {
        let table = RoutingTable::from_config(&startup.services, 1);
        metrics::record_reload(true, table.active_count());

        Self {
            source: Box::new(source),
            table: table.into_shared(),
            baseline: Mutex::new(startup),
        }
    }

    /// Handle for readers.
    pub fn table(&self) -> SharedTable {
        Arc::clone(&self.table)
    }

    /// Reload from the configuration source and swap the table in.
    pub fn reload(&self) -> Result<ReloadSummary, ConfigError> {
        let baseline = self.baseline.lock().unwrap_or_else(PoisonError::into_inner);

        let config = match self.source.load() {
            Ok(config) => config,
            Err(e) => {
                let current = self.table.load();
                tracing::error!(
                    source = %self.source.describe(),
                    error = %e,
                    generation = current.generation(),
                    "Reload failed, keeping current routing table"
                );
                metrics::record_reload(false, current.active_count());
                return Err(e);
            }
        };

        let generation = self.table.load().generation() + 1;
        let table = RoutingTable::from_config(&config.services, generation);
        let summary = ReloadSummary {
            generation,
            routes: table.len(),
            active_routes: table.active_count(),
        };

        self.table.store(Arc::new(table));

        tracing::info!(
            source = %self.source.describe(),
            generation = summary.generation,
            routes = summary.routes,
            active_routes = summary.active_routes,
            "Routing table reloaded"
        );
        log_route_listing(&config.services);
        for setting in restart_required_changes(&baseline, &config) {
            tracing::warn!(setting, "Setting changed on reload; takes effect after restart");
        }
        metrics::record_reload(true, summary.active_routes);

        Ok(summary)
    }

    /// Run [`reload`](Self::reload) off the async executor.
    pub async fn reload_in_background(self: &Arc<Self>, trigger: &'static str) {
        tracing::info!(trigger, "Reloading configuration");
        let controller = Arc::clone(self);
        if let Err(e) = tokio::task::spawn_blocking(move || controller.reload()).await {
            tracing::error!(trigger, error = %e, "Reload task panicked");
        }
    }
}

/// Settings outside the route list that a reload cannot apply.
fn restart_required_changes(running: &GatewayConfig, loaded: &GatewayConfig) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if running.bind_address() != loaded.bind_address() {
        changed.push("listen address");
    }
    if running.debug != loaded.debug {
        changed.push("debug");
    }
    if running.server != loaded.server {
        changed.push("server");
    }
    if running.timeouts != loaded.timeouts {
        changed.push("timeouts");
    }
    if running.reload != loaded.reload {
        changed.push("reload");
    }
    if running.observability != loaded.observability {
        changed.push("observability");
    }
    changed
}
