//! Configuration structures for the conversion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::document::{DEFAULT_TIMESTAMP_FORMAT, validate_timestamp_format};
use crate::error::{DotdashError, Result};
use crate::morse::UnmappedPolicy;

/// Main configuration for dotdash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DotdashConfig {
    /// Morse codec configuration.
    pub codec: CodecConfig,

    /// Delimited table extraction configuration.
    pub csv: CsvConfig,

    /// Output persistence configuration.
    pub output: OutputConfig,
}

/// Morse codec configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Handling of characters and symbols missing from the table.
    pub policy: UnmappedPolicy,
}

/// Delimited table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Discard the first row. It is dropped whether or not it is a header.
    pub skip_header: bool,

    /// Field delimiter.
    pub delimiter: char,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            skip_header: true,
            delimiter: ',',
        }
    }
}

/// Where and how converted files are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving converted files.
    pub directory: PathBuf,

    /// `strftime` pattern for the filename timestamp.
    pub timestamp_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("converted_files"),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl DotdashConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| DotdashError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DotdashError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        validate_timestamp_format(&self.output.timestamp_format)
    }
}
