//! Startup orchestration.
//!
//! Load config → init logging/metrics → build table → bind → spawn reload
//! triggers → serve. Any startup error is fatal; reload errors never are.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::watcher::ConfigWatcher;
use crate::config::{ConfigSource, FileConfigSource};
use crate::http::server::{GatewaySettings, GatewayServer};
use crate::lifecycle::reload::ReloadController;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::{logging, metrics};
use crate::routing::table::log_route_listing;

/// Options supplied on the command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub config_path: PathBuf,
    /// Force debug mode regardless of the file.
    pub debug: bool,
    /// Validate the configuration and exit.
    pub check: bool,
}

/// Run the gateway until shutdown.
pub async fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let source = FileConfigSource::new(&options.config_path);
    let file_config = source.load()?;

    let mut config = file_config.clone();
    config.debug |= options.debug;

    logging::init_logging(&config.observability, config.debug);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %source.describe(),
        debug = config.debug,
        "Configuration loaded"
    );

    if options.check {
        log_route_listing(&config.services);
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    if let Some(address) = &config.observability.metrics_address {
        match address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(metrics_address = %address, error = %e, "Invalid metrics address"),
        }
    }

    let settings = GatewaySettings::from_config(&config)?;
    let controller = Arc::new(ReloadController::new(source.clone(), file_config));
    log_route_listing(&config.services);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Starting gateway");

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_ctrl_c_handler(Arc::clone(&shutdown));
    signals::spawn_sighup_reload(Arc::clone(&controller));
    if config.reload.stdin_commands {
        signals::spawn_stdin_commands(Arc::clone(&controller));
    }
    let _watcher = if config.reload.watch {
        Some(ConfigWatcher::new(source.path(), Arc::clone(&controller)).run()?)
    } else {
        None
    };

    let server = GatewayServer::new(settings, controller.table());
    server.run(listener, shutdown.signalled()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
