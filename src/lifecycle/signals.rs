//! OS signal and operator command handling.
//!
//! - SIGINT / Ctrl-C → graceful shutdown
//! - SIGHUP → routing table reload (unix only)
//! - `r` on stdin → routing table reload

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::lifecycle::reload::ReloadController;
use crate::lifecycle::shutdown::Shutdown;

/// An operator command read from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => None,
            "r" => Some(Command::Reload),
            other => Some(Command::Unknown(other.to_string())),
        }
    }
}

/// Trigger `shutdown` on the first Ctrl-C.
pub fn spawn_ctrl_c_handler(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                if shutdown.trigger() {
                    tracing::info!("Received SIGINT, shutting down");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to install Ctrl-C handler"),
        }
    });
}

/// Reload on every SIGHUP.
#[cfg(unix)]
pub fn spawn_sighup_reload(controller: Arc<ReloadController>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangups = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };
        while hangups.recv().await.is_some() {
            controller.reload_in_background("sighup").await;
        }
    });
}

#[cfg(not(unix))]
pub fn spawn_sighup_reload(_controller: Arc<ReloadController>) {}

/// Read operator commands from stdin until it closes.
pub fn spawn_stdin_commands(controller: Arc<ReloadController>) {
    tokio::spawn(async move {
        run_commands(BufReader::new(tokio::io::stdin()), controller).await;
    });
}

/// Process commands line by line from `input`.
pub async fn run_commands<R>(input: R, controller: Arc<ReloadController>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match Command::parse(&line) {
                Some(Command::Reload) => {
                    tracing::info!(command = "r", "Received command");
                    controller.reload_in_background("stdin").await;
                }
                Some(Command::Unknown(command)) => {
                    tracing::error!(command = %command, "Unknown command");
                }
                None => {}
            },
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        }
    }
    tracing::debug!("Command input closed");
}
