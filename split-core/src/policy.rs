//! Split policies and the byte-count grammar

use crate::error::{Result, SplitError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Default values shared by the engine and its callers
pub mod defaults {
    /// Output prefix when none is given
    pub const PREFIX: &str = "x";

    /// Lines per output file
    pub const LINE_COUNT: u64 = 1000;

    /// Bytes per output file ("not set")
    pub const BYTE_COUNT: u64 = 0;

    /// Number of chunks ("not set")
    pub const CHUNK_COUNT: u64 = 0;

    /// Characters in an output suffix
    pub const SUFFIX_LENGTH: usize = 2;
}

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

static BYTE_COUNT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn byte_count_pattern() -> &'static Regex {
    BYTE_COUNT_PATTERN
        .get_or_init(|| Regex::new(r"^(\d+)([KkMmGg]?)$").expect("byte count pattern is valid"))
}

/// How the input is partitioned into output files
///
/// Exactly one policy is active for a run, and the variant alone decides
/// which algorithm the [`Splitter`](crate::Splitter) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitPolicy {
    /// At most `n` lines per output file
    LineCount(u64),
    /// `n` bytes per output file; `0` writes the whole input to one file
    ByteCount(u64),
    /// Exactly `n` outputs of equal size, the last absorbing the remainder
    ChunkCount(u64),
}

impl Default for SplitPolicy {
    fn default() -> Self {
        SplitPolicy::LineCount(defaults::LINE_COUNT)
    }
}

impl SplitPolicy {
    /// Build a byte-count policy from `<digits>[K|k|M|m|G|g]`.
    ///
    /// Malformed input yields `ByteCount(0)`.
    pub fn byte_count_from_str(s: &str) -> Self {
        SplitPolicy::ByteCount(parse_byte_count(s))
    }

    /// The numeric parameter carried by the policy
    pub fn value(&self) -> u64 {
        match *self {
            SplitPolicy::LineCount(n) | SplitPolicy::ByteCount(n) | SplitPolicy::ChunkCount(n) => n,
        }
    }

    /// Whether the parameter equals the default for its variant
    pub fn is_default_value(&self) -> bool {
        match *self {
            SplitPolicy::LineCount(n) => n == defaults::LINE_COUNT,
            SplitPolicy::ByteCount(n) => n == defaults::BYTE_COUNT,
            SplitPolicy::ChunkCount(n) => n == defaults::CHUNK_COUNT,
        }
    }

    /// Reject parameters no algorithm can run with
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            SplitPolicy::LineCount(0) => Err(SplitError::InvalidPolicy(
                "line count must be at least 1".into(),
            )),
            SplitPolicy::ChunkCount(0) => Err(SplitError::InvalidPolicy(
                "chunk count must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPolicy::LineCount(n) => write!(f, "{n} lines per file"),
            SplitPolicy::ByteCount(0) => write!(f, "whole input in one file"),
            SplitPolicy::ByteCount(n) => write!(f, "{n} bytes per file"),
            SplitPolicy::ChunkCount(n) => write!(f, "{n} chunks"),
        }
    }
}

/// Parse a byte count such as `512`, `10k` or `3G`.
///
/// Suffixes are binary multiples. Anything that does not match
/// `^\d+[KkMmGg]?$`, or that overflows `u64`, parses as `0`.
pub fn parse_byte_count(s: &str) -> u64 {
    let Some(caps) = byte_count_pattern().captures(s) else {
        return defaults::BYTE_COUNT;
    };

    let Ok(value) = caps[1].parse::<u64>() else {
        return defaults::BYTE_COUNT;
    };

    let multiplier = match caps[2].to_ascii_lowercase().as_str() {
        "k" => KIB,
        "m" => MIB,
        "g" => GIB,
        _ => 1,
    };

    value
        .checked_mul(multiplier)
        .unwrap_or(defaults::BYTE_COUNT)
}
