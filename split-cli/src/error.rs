//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// Input rejected by text detection
    NotText(String),
    /// Output directory missing or not a directory
    OutputDirNotFound(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "{path}: no such file or directory"),
            CliError::NotText(name) => write!(f, "{name}: not a text file"),
            CliError::OutputDirNotFound(path) => {
                write!(f, "output directory not found: {path}")
            }
            CliError::ConfigError(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
