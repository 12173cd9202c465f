//! Service configuration loaded from a YAML file.
//!
//! The file location comes from the `CONFIG_PATH` environment variable or,
//! when that is unset or empty, the `--config <path>` flag. Example:
//!
//! ```yaml
//! env: "dev"
//! storage_path: "storage/storage.db"
//! http_server:
//!   address: "localhost:8082"
//! ```

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use clap::Parser;
use serde::Deserialize;

/// Environment variable naming the config file; takes precedence over
/// `--config`.
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

/// Environment variable overriding the file's `env` value.
pub const ENV_VAR: &str = "ENV";

/// Deployment environment assumed when neither the file nor `ENV` names one.
pub const DEFAULT_ENV: &str = "production";

/// Command-line arguments for the `roster-gateway` binary.
#[derive(Debug, Parser)]
#[command(name = "roster-gateway", version, about = "Student records HTTP API")]
pub struct Args {
    /// Path to the YAML configuration file; ignored when `CONFIG_PATH` is
    /// set.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// The config path to load: `CONFIG_PATH` when set and non-empty,
    /// otherwise the `--config` flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        resolve_config_path(std::env::var_os(CONFIG_PATH_VAR), self.config.as_deref())
    }
}

fn resolve_config_path(from_env: Option<OsString>, from_flag: Option<&Path>) -> Option<PathBuf> {
    from_env
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| from_flag.map(Path::to_path_buf))
}

/// Errors raised while locating or parsing the configuration file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Neither `CONFIG_PATH` nor `--config` was supplied.
    #[error("config path is not set; set CONFIG_PATH or pass --config")]
    MissingPath,

    /// The configured path does not exist.
    #[error("config file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or misses a required key.
    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct HttpServerConfig {
    /// Socket address to bind, e.g. `localhost:8082`.
    #[serde(alias = "addr")]
    pub address: String,
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct Config {
    /// Deployment environment name (`dev`, `production`, ...).
    #[serde(default = "default_env")]
    pub env: String,
    /// Filesystem path of the SQLite database.
    pub storage_path: PathBuf,
    /// HTTP listener settings.
    pub http_server: HttpServerConfig,
}

fn default_env() -> String {
    DEFAULT_ENV.to_owned()
}

impl Config {
    /// Resolve the config path (see [`Args::config_path`]) and load it,
    /// applying the `ENV` override.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingPath`] if no path was given, otherwise
    /// any error from [`Config::from_file`].
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let path = args.config_path().ok_or(ConfigError::MissingPath)?;
        let mut config = Self::from_file(&path)?;
        config.override_env(std::env::var(ENV_VAR).ok());
        Ok(config)
    }

    /// Replace `env` with `value` unless it is absent or empty.
    pub fn override_env(&mut self, value: Option<String>) {
        if let Some(env) = value.filter(|v| !v.is_empty()) {
            self.env = env;
        }
    }

    /// Read and parse the YAML file at `path`.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`], [`ConfigError::Read`] or
    /// [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the text is malformed or a required
    /// key is missing.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
