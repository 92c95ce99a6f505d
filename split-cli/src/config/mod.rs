//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use split_core::defaults;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Output naming and placement
    #[serde(default)]
    pub output: OutputConfig,

    /// Policy defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix used when none is given on the command line
    pub prefix: String,

    /// Directory for outputs (default: current directory)
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: defaults::PREFIX.to_string(),
            directory: None,
        }
    }
}

/// Defaults applied when no policy flag is given
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Lines per output file
    pub line_count: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            line_count: defaults::LINE_COUNT,
        }
    }
}

impl CliConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate TOML configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.defaults.line_count == 0 {
            return Err(CliError::ConfigError(
                "defaults.line_count must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
