//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON/TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → routing table built from `services`
//!
//! On reload trigger (stdin, SIGHUP, watcher.rs):
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the routing table snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{ConfigError, ConfigSource, FileConfigSource};
pub use schema::{
    GatewayConfig, LogFormat, ObservabilityConfig, ReloadConfig, ServerConfig, ServiceConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
