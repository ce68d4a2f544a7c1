use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::SizeMode;

/// File names looked up in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["dockview.yml", "dockview.yaml", ".dockview.yml"];

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Engine connection settings
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DockerSettings {
    /// Engine address (`unix://...`, `tcp://...`, `http://...`).
    /// Falls back to `DOCKER_HOST`, then the local socket.
    pub host: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Print image sizes as exact megabytes instead of whole ones
    pub fractional_sizes: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub enabled: bool,
    pub level: String,
    /// Log file; defaults to a file under the state directory
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".into(),
            file: None,
        }
    }
}

/// Root configuration file structure
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DockviewConfig {
    pub docker: DockerSettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

impl DockviewConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// First config file found in `dir`, if any.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.docker.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "docker.timeout_secs must be greater than zero".into(),
            });
        }

        let level = self.log.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!(
                    "log.level must be one of {}, got {:?}",
                    LOG_LEVELS.join(", "),
                    self.log.level
                ),
            });
        }

        Ok(())
    }

    pub fn size_mode(&self) -> SizeMode {
        if self.display.fractional_sizes {
            SizeMode::Fractional
        } else {
            SizeMode::Truncated
        }
    }
}

impl FromStr for DockviewConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        // An empty file is a valid, all-defaults config.
        let config: DockviewConfig = if content.trim().is_empty() {
            DockviewConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }
}
