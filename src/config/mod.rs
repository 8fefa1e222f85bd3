//! Configuration module for the MPC autocomplete server.
//!
//! Settings are layered: built-in defaults, then an optional file (TOML,
//! YAML, JSON), then environment variables such as
//! `MPC__MODEL__MAX_COMPLETIONS=5`. The merged result is validated before use.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod corpus;
pub mod model;
pub mod server;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration file picked up when no path is given explicitly.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "MPC";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the MPC autocomplete server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MpcConfig {
    /// HTTP server configuration
    pub server: server::ServerConfig,

    /// Completion model configuration
    pub model: model::ModelConfig,

    /// Corpus ingestion configuration
    pub corpus: corpus::CorpusConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for MpcConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.model.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader for the MPC autocomplete server.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from a file and environment variables.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::FileNotFound`] - The configured file does not exist.
    /// * [`ConfigError::ParseError`] - The file or an override could not be parsed.
    /// * [`ConfigError::ValidationError`] / [`ConfigError::ValueOutOfRange`] -
    ///   The merged configuration is invalid.
    pub fn load(&self) -> ConfigResult<MpcConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&MpcConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let mpc_config: MpcConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        mpc_config.validate()?;

        Ok(mpc_config)
    }
}

/// Loads the configuration the CLI runs with.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// used when present and the built-in defaults otherwise. Environment
/// overrides apply in every case.
pub fn load_config(path: Option<&Path>) -> ConfigResult<MpcConfig> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Some(default)
            } else {
                tracing::debug!(
                    "No configuration file at {}, using defaults",
                    DEFAULT_CONFIG_PATH
                );
                None
            }
        }
    };

    ConfigLoader::new(path, ENV_PREFIX).load()
}

/// Renders `config` as TOML.
pub fn to_toml(config: &MpcConfig) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))
}
