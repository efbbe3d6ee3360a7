//! CLI configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`CliConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Unknown log level name.
    #[error("invalid log level '{0}': expected trace, debug, info, warn or error")]
    LogLevel(String),
}

/// CLI configuration, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print frequency table, codes and sizes when encoding
    #[serde(default)]
    pub report: bool,

    /// Extension appended to encoded outputs
    #[serde(default = "default_encoded_extension")]
    pub encoded_extension: String,

    /// Extension appended to decoded outputs
    #[serde(default = "default_decoded_extension")]
    pub decoded_extension: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            report: false,
            encoded_extension: default_encoded_extension(),
            decoded_extension: default_decoded_extension(),
        }
    }
}

impl CliConfig {
    /// Parse a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.level()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Apply command-line overrides.
    pub fn merge_args(&mut self, log_level: Option<&str>, report: bool) {
        if let Some(level) = log_level {
            self.log_level = level.to_string();
        }
        self.report |= report;
    }

    /// Parsed log level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(ConfigError::LogLevel(self.log_level.clone())),
        }
    }

    /// Default output path for encoding `input`.
    pub fn encoded_path(&self, input: &Path) -> PathBuf {
        append_extension(input, &self.encoded_extension)
    }

    /// Default output path for decoding `input`.
    pub fn decoded_path(&self, input: &Path) -> PathBuf {
        append_extension(input, &self.decoded_extension)
    }
}

/// `data.txt` + `huff` -> `data.txt.huff`
fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_encoded_extension() -> String {
    "huff".to_string()
}

fn default_decoded_extension() -> String {
    "decoded".to_string()
}
