//! Configuration management for kask
//!
//! Everything has a sensible default; the config file is optional and
//! only overrides the distribution host and the plugin cache location.
//! The `KUI_DIST` environment variable always wins over the file.

use crate::dist::DIST_HOST_ENV;
use crate::error::{KaskError, KaskResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// kask configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub dist: DistConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Distribution download settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DistConfig {
    /// Replacement download host (same meaning as `KUI_DIST`)
    pub host: Option<String>,
}

/// Cache location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Plugin directory holding per-version caches (default `~/.kask`)
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Effective download host override, environment winning over file
    pub fn dist_host(&self) -> Option<String> {
        std::env::var_os(DIST_HOST_ENV)
            .map(|v| v.to_string_lossy().into_owned())
            .or_else(|| self.dist.host.clone())
    }

    /// Plugin directory holding the per-version caches and `bin/`
    pub fn plugin_dir(&self) -> KaskResult<PathBuf> {
        if let Some(ref dir) = self.cache.directory {
            return Ok(dir.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".kask"))
            .ok_or(KaskError::HomeDirectoryUnavailable)
    }
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with the default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kask")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is absent
    pub async fn load(&self) -> KaskResult<Config> {
        if !self.config_path.exists() {
            debug!("config file not found, using defaults");
            return Ok(Config::default());
        }
        self.load_from_file(&self.config_path).await
    }

    async fn load_from_file(&self, path: &Path) -> KaskResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| KaskError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| KaskError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
