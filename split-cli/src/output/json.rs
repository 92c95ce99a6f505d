//! JSON report formatter

use super::ReportFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Manifest of one run
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Produced outputs in suffix order
    pub files: Vec<ManifestEntry>,
    /// Sum of all output sizes
    pub total_bytes: u64,
}

/// One produced output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ManifestEntry {
    /// Output path
    pub path: String,
    /// Size in bytes
    pub bytes: u64,
}

/// JSON formatter - writes a single manifest document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    manifest: Manifest,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            manifest: Manifest::default(),
        }
    }
}

impl JsonFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportFormatter for JsonFormatter<W> {
    fn output_created(&mut self, path: &str, bytes: u64) -> Result<()> {
        self.manifest.files.push(ManifestEntry {
            path: path.to_string(),
            bytes,
        });
        self.manifest.total_bytes += bytes;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.manifest)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
