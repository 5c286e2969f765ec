//! Configuration for dirs-engine
//!
//! Sources, highest precedence first:
//! 1. CLI arguments
//! 2. Environment variables (DIRS_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirsConfig {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

/// Where assessment data is kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one JSON file per storage slot
    pub data_dir: String,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (unset = stderr only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Emit JSON lines instead of text
    pub json_format: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.dirs-engine".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 10,
            max_files: 3,
            json_format: false,
        }
    }
}

impl DirsConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::find_config_file(config_path)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse a single TOML file without overrides or validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config_parse(format!("{}", path.display()), e))?;
        info!(path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Find the configuration file to use
    pub fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // An explicit path must exist
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let mut search_paths = vec![PathBuf::from("dirs-engine.toml")];
        if let Some(dir) = dirs::config_dir() {
            search_paths.push(dir.join("dirs-engine").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".dirs-engine").join("config.toml"));
        }

        for path in search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply DIRS_* environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DIRS_DATA_DIR") {
            self.storage.data_dir = val;
        }
        if let Some(val) = lookup("DIRS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("DIRS_LOG_FILE") {
            self.logging.file = if val.is_empty() { None } else { Some(val) };
        }
        if let Some(val) = lookup("DIRS_LOG_JSON") {
            self.logging.json_format = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Expand ~ and environment variables in paths
    pub fn expand_paths(&mut self) {
        self.storage.data_dir = expand_path(&self.storage.data_dir);
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.data_dir.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "storage.data_dir",
                "Data directory cannot be empty",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        if self.logging.max_files == 0 {
            return Err(Error::config_field_invalid(
                "logging.max_files",
                "max_files must be at least 1",
            ));
        }

        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location written by `config init`.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dirs-engine")
        .join("config.toml")
}

/// Write a commented default configuration file, returning its path.
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Default configuration content with comments
pub fn generate_default_config() -> String {
    r#"# dirs-engine configuration

[storage]
# Directory for assessment answers, results, history and progress
data_dir = "~/.dirs-engine"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (leave unset to log to stderr only)
# file = "~/.dirs-engine/logs/dirs-engine.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 10

# Number of rotated log files to keep
max_files = 3

# Emit JSON lines instead of text
json_format = false
"#
    .to_string()
}
