//! Opening the input stream

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the bytes to split come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A named file
    File(PathBuf),
}

impl InputSource {
    /// Resolve the positional file argument; absent or `-` means stdin
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => InputSource::Stdin,
            Some(path) if path == Path::new("-") => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_path_buf()),
        }
    }

    /// Name used in messages
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => "standard input".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Open the source for reading
    pub fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => {
                let file = match File::open(path) {
                    Ok(file) => file,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        return Err(CliError::FileNotFound(path.display().to_string()).into());
                    }
                    Err(e) => {
                        return Err(e)
                            .with_context(|| format!("Failed to open input: {}", path.display()));
                    }
                };

                if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
                    anyhow::bail!("{}: is a directory", path.display());
                }

                Ok(Box::new(file))
            }
        }
    }
}
