//! Run report formatting module

use anyhow::Result;
use split_core::SplitSummary;
use std::path::Path;

/// Trait for run report formatters
pub trait ReportFormatter {
    /// Record one produced output
    fn output_created(&mut self, path: &str, bytes: u64) -> Result<()>;

    /// Finalize the report (e.g., emit the JSON document)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Path shown for an output; bare names when writing to `.`
pub fn display_path(dir: &Path, name: &str) -> String {
    if dir == Path::new(".") {
        name.to_string()
    } else {
        dir.join(name).display().to_string()
    }
}

/// Feed every output of `summary` to `formatter`
pub fn write_report(
    formatter: &mut dyn ReportFormatter,
    dir: &Path,
    summary: &SplitSummary,
) -> Result<()> {
    for file in &summary.files {
        formatter.output_created(&display_path(dir, &file.name), file.bytes)?;
    }
    formatter.finish()
}
