//! Command-line configuration
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! [logging]
//! level = "info"
//! file = "tiffstack.log"
//!
//! [output]
//! progress = true
//! array_format = "npy"
//! ```

use std::fs;
use std::path::Path;

use log::{debug, LevelFilter};

use crate::array::export::ArrayFormat;
use crate::errors::{ReaderError, ReaderResult};

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tiffstack.toml";

/// Settings for the command-line tool
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum level of log records
    pub log_level: LevelFilter,
    /// Write log records to this file instead of the console
    pub log_file: Option<String>,
    /// Show a progress bar while materializing arrays
    pub progress: bool,
    /// Default format for exported arrays
    pub array_format: ArrayFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LevelFilter::Info,
            log_file: None,
            progress: true,
            array_format: ArrayFormat::Npy,
        }
    }
}

impl Config {
    /// Parse a configuration from a TOML string
    pub fn from_str(content: &str) -> ReaderResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| ReaderError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(logging) = toml_value.get("logging").and_then(|v| v.as_table()) {
            if let Some(level) = logging.get("level") {
                let level = level
                    .as_str()
                    .ok_or_else(|| ReaderError::ConfigError("logging.level must be a string".to_string()))?;
                config.log_level = level
                    .parse()
                    .map_err(|_| ReaderError::ConfigError(format!("Invalid log level: {}", level)))?;
            }
            if let Some(file) = logging.get("file") {
                let file = file
                    .as_str()
                    .ok_or_else(|| ReaderError::ConfigError("logging.file must be a string".to_string()))?;
                config.log_file = Some(file.to_string());
            }
        }

        if let Some(output) = toml_value.get("output").and_then(|v| v.as_table()) {
            if let Some(progress) = output.get("progress") {
                config.progress = progress
                    .as_bool()
                    .ok_or_else(|| ReaderError::ConfigError("output.progress must be a boolean".to_string()))?;
            }
            if let Some(format) = output.get("array_format") {
                let format = format
                    .as_str()
                    .ok_or_else(|| ReaderError::ConfigError("output.array_format must be a string".to_string()))?;
                config.array_format = format
                    .parse()
                    .map_err(|_| ReaderError::ConfigError(format!("Invalid array format: {}", format)))?;
            }
        }

        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> ReaderResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load the configuration for a run
    ///
    /// An explicit path must exist. Without one, `tiffstack.toml` in the
    /// working directory is used when present, and defaults otherwise.
    pub fn load(path: Option<&str>) -> ReaderResult<Self> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                debug!("Using configuration file {}", DEFAULT_CONFIG_FILE);
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Config::default()),
        }
    }
}
