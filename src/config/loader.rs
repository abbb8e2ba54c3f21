//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where reloadable configuration comes from.
pub trait ConfigSource: Send + Sync {
    /// Read, decode and validate the configuration.
    fn load(&self) -> Result<GatewayConfig, ConfigError>;

    /// Human-readable origin for log messages.
    fn describe(&self) -> String;
}

/// A configuration file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<GatewayConfig, ConfigError> {
        load_config(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Load and validate configuration from a file.
///
/// Files ending in `.toml` are read as TOML, everything else as JSON.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        parse_toml(&content)
    } else {
        parse_json(&content)
    }
}

/// Decode and validate a JSON configuration document.
pub fn parse_json(content: &str) -> Result<GatewayConfig, ConfigError> {
    finish(serde_json::from_str(content)?)
}

/// Decode and validate a TOML configuration document.
pub fn parse_toml(content: &str) -> Result<GatewayConfig, ConfigError> {
    finish(toml::from_str(content)?)
}

fn finish(mut config: GatewayConfig) -> Result<GatewayConfig, ConfigError> {
    for service in &mut config.services {
        if let Some(method) = service.method.as_mut() {
            *method = method.to_uppercase();
        }
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
