//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Core components emit:
//!     → tracing events (request, match, forward, reload)
//!     → logging.rs subscriber (stdout: compact, pretty or JSON)
//!     → metrics.rs counters/histograms (optional Prometheus scrape)
//! ```
//!
//! The core never formats log lines itself; it only emits leveled events
//! with structured fields.

pub mod logging;
pub mod metrics;
