//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::lifecycle::reload::ReloadController;

/// Monitors the configuration file and reloads the routing table when it changes.
pub struct ConfigWatcher {
    path: PathBuf,
    controller: Arc<ReloadController>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, controller: Arc<ReloadController>) -> Self {
        Self {
            path: path.to_path_buf(),
            controller,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let controller = self.controller;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(trigger = "watch", "Config file change detected, reloading");
                    // failures are logged by the controller; the old table stays
                    let _ = controller.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}
