//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (current snapshot)
//!     → matcher.rs (normalize path, exact scan, prefix scan)
//!     → Return: RouteMatch or None
//!
//! Route Compilation (startup and reload):
//!     ServiceConfig[]
//!     → route.rs (parse method, mark unreachable routes inactive)
//!     → Freeze as immutable RoutingTable
//! ```

pub mod matcher;
pub mod route;
pub mod table;

pub use matcher::{match_route, normalize_path, RouteMatch};
pub use route::{Backend, Route};
pub use table::{RoutingTable, SharedTable};
