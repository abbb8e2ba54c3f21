//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, health check, route lookup)
//!     → forward.rs (build outbound request, call backend)
//!         → headers.rs (strip hop-by-hop, host/origin/x-forwarded-for)
//!     → response.rs (fixed 200/404/502 bodies) or relayed backend response
//!     → Send to client
//! ```

pub mod forward;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, ForwardSettings, Forwarder};
pub use request::X_REQUEST_ID;
pub use server::{GatewayServer, GatewaySettings};
