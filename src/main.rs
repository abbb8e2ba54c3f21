//! route-gateway
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!   Client        │  ┌────────┐   ┌─────────┐   ┌───────────┐        │
//!   ──────────────┼─▶│ server │──▶│ routing │──▶│ forwarder │────────┼──▶ Backend
//!                 │  │ health │   │ matcher │   │  headers  │        │
//!   ◀─────────────┼──│ 404    │   └────▲────┘   └───────────┘◀───────┼─── (streamed)
//!                 │  └────────┘        │ snapshot (ArcSwap)          │
//!                 │               ┌────┴─────┐                       │
//!                 │               │  reload  │◀── stdin `r`, SIGHUP, │
//!                 │               │controller│    file watcher       │
//!                 │               └──────────┘                       │
//!                 └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use route_gateway::lifecycle::startup::{self, Options};

#[derive(Parser)]
#[command(name = "route-gateway")]
#[command(about = "HTTP gateway routing requests to backend services", long_about = None)]
struct Cli {
    /// Configuration file (JSON, or TOML with a .toml extension).
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Enable debug mode regardless of the configuration file.
    #[arg(short, long)]
    debug: bool,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    startup::run(Options {
        config_path: cli.config,
        debug: cli.debug,
        check: cli.check,
    })
    .await
}
