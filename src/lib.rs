//! Single-process HTTP gateway.
//!
//! Routes requests to backend services from a declarative routing table:
//! exact path+method routes take precedence over prefix routes, headers are
//! sanitized for forwarding, and the table can be reloaded without downtime.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::{GatewayServer, GatewaySettings};
pub use lifecycle::{ReloadController, Shutdown};
pub use routing::{RoutingTable, SharedTable};
