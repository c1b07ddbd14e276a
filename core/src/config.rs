//! Typed configuration loaded from `config.toml`.
//!
//! Every section has defaults, so an empty or missing file is a valid
//! configuration. Values are validated once at construction.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::model::record::DEFAULT_TARGET;
use crate::validate::{MAX_CLASSES_PER_WEEK, MAX_WEEKS};

const CONFIG_DIR_NAME: &str = "attendance-planner";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_DIR_NAME: &str = ".attendance-planner";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("could not determine home directory")]
    NoHomeDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub target: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self { target: DEFAULT_TARGET }
    }
}

/// Sanity ceiling applied to total and remaining classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_classes: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_classes: 10_000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub weeks: u32,
    pub classes_per_week: u32,
    /// Upper bound for what-if tables, applied on top of remaining classes.
    pub max_simulation: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            weeks: 8,
            classes_per_week: 6,
            max_simulation: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Empty means `~/.attendance-planner`.
    pub data_dir: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    pub limits: Limits,
    pub planner: PlannerConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// `~/.config/attendance-planner/config.toml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Loads the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let target = self.defaults.target;
        if !target.is_finite() || target <= 0.0 || target > 100.0 {
            return Err(ConfigError::Invalid {
                key: "defaults.target",
                reason: format!("{target} is outside (0, 100]"),
            });
        }
        if self.limits.max_classes == 0 {
            return Err(ConfigError::Invalid {
                key: "limits.max_classes",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.planner.weeks == 0 || self.planner.weeks > MAX_WEEKS {
            return Err(ConfigError::Invalid {
                key: "planner.weeks",
                reason: format!("must be between 1 and {MAX_WEEKS}"),
            });
        }
        if self.planner.classes_per_week == 0 || self.planner.classes_per_week > MAX_CLASSES_PER_WEEK {
            return Err(ConfigError::Invalid {
                key: "planner.classes_per_week",
                reason: format!("must be between 1 and {MAX_CLASSES_PER_WEEK}"),
            });
        }
        Ok(())
    }

    /// Directory holding the attendance record and reminder settings.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if !self.paths.data_dir.trim().is_empty() {
            return Ok(PathBuf::from(self.paths.data_dir.trim()));
        }
        let home_dir = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home_dir.join(DATA_DIR_NAME))
    }
}
