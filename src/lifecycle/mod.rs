//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build routing table → Bind → Serve
//!
//! Reload (reload.rs):
//!     stdin `r` / SIGHUP / file watcher
//!     → reload source → validate → build table → atomic swap
//!     (on failure: keep serving the previous table)
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGINT → stop accepting → drain in-flight requests → exit
//! ```

pub mod reload;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use reload::{ReloadController, ReloadSummary};
pub use shutdown::Shutdown;
