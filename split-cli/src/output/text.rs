//! Plain text report formatter

use super::ReportFormatter;
use anyhow::Result;
use std::io::{self, Write};

/// One `creating file '<path>'` line per output
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn output_created(&mut self, path: &str, _bytes: u64) -> Result<()> {
        writeln!(self.writer, "creating file '{path}'")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
