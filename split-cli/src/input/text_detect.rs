//! Rejecting inputs that are not text

use crate::error::CliError;
use anyhow::Result;
use std::io::BufRead;

/// Share of control bytes above which a sample counts as binary
const MAX_CONTROL_RATIO: f64 = 0.1;

fn is_text_control(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r' | 0x0c | 0x08 | 0x1b)
}

/// Heuristic text check on a leading sample.
///
/// A NUL byte marks binary data outright; otherwise the sample is text
/// while control characters other than ordinary whitespace stay rare.
/// High bytes are allowed so UTF-8 and legacy 8-bit encodings both pass.
pub fn looks_like_text(sample: &[u8]) -> bool {
    if sample.contains(&0) {
        return false;
    }
    if sample.is_empty() {
        return true;
    }

    let control = sample
        .iter()
        .filter(|&&b| (b < 0x20 || b == 0x7f) && !is_text_control(b))
        .count();

    (control as f64 / sample.len() as f64) <= MAX_CONTROL_RATIO
}

/// Peek at the start of `reader` without consuming it and fail unless it
/// looks like text
pub fn ensure_text<R: BufRead>(reader: &mut R, name: &str) -> Result<()> {
    let sample = reader.fill_buf()?;
    if !looks_like_text(sample) {
        return Err(CliError::NotText(name.to_string()).into());
    }

    log::debug!("{name}: text check passed on {} bytes", sample.len());
    Ok(())
}
