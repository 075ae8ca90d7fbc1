//! Status line configuration

use sensbar_core::DEFAULT_MIN_REFRESH;
use sensbar_types::{ModuleDeclaration, ProtocolHeader};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Errors that stop sensbar from starting
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// Signal the bar sends to pause output (0 = bar default)
    #[serde(default)]
    pub stop_signal: i32,
    /// Signal the bar sends to resume output (0 = bar default)
    #[serde(default)]
    pub cont_signal: i32,
    #[serde(default)]
    pub click_events: bool,
    /// Shortest interval between two emitted frames
    #[serde(default = "default_min_refresh_ms")]
    pub min_refresh_ms: u64,
    /// Modules in display order
    #[serde(default)]
    pub modules: Vec<ModuleDeclaration>,
}

fn default_min_refresh_ms() -> u64 {
    DEFAULT_MIN_REFRESH.as_millis() as u64
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            stop_signal: 0,
            cont_signal: 0,
            click_events: false,
            min_refresh_ms: default_min_refresh_ms(),
            modules: Vec::new(),
        }
    }
}

impl StatusConfig {
    /// Parse configuration from YAML text; an empty document is the default config
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The per-user config file if it exists, else `config.yaml` in the working directory
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "sensbar")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    pub fn header(&self) -> ProtocolHeader {
        ProtocolHeader::new(self.stop_signal, self.cont_signal, self.click_events)
    }

    pub fn min_refresh(&self) -> Duration {
        Duration::from_millis(self.min_refresh_ms)
    }
}
