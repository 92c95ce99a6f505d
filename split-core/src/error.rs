//! Error types for the split engine

use std::io;
use thiserror::Error;

/// Errors produced while splitting an input stream
#[derive(Debug, Error)]
pub enum SplitError {
    /// The suffix space ran out before the input did
    #[error("too many output files: more than {limit} outputs required")]
    TooManyOutputs {
        /// Number of distinct suffixes available
        limit: usize,
    },

    /// Chunk count larger than the input length
    #[error("chunk size is zero: {len} bytes cannot be split into {chunks} chunks")]
    ZeroChunkSize {
        /// Total input length in bytes
        len: usize,
        /// Requested number of chunks
        chunks: u64,
    },

    /// A policy value the engine cannot run with
    #[error("invalid split policy: {0}")]
    InvalidPolicy(String),

    /// Reading the input failed
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),

    /// An output could not be created
    #[error("failed to create '{name}': {source}")]
    Create {
        /// Output name
        name: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing to an output failed
    #[error("failed to write '{name}': {source}")]
    Write {
        /// Output name
        name: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Closing an output failed
    #[error("failed to close '{name}': {source}")]
    Close {
        /// Output name
        name: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Removing an output failed
    #[error("failed to delete '{name}': {source}")]
    Delete {
        /// Output name
        name: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    /// Whether the caller can report this and carry on.
    ///
    /// Resource exhaustion is recoverable; everything in the I/O class is
    /// fatal for the current operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SplitError::TooManyOutputs { .. } | SplitError::ZeroChunkSize { .. }
        )
    }
}

/// Result type for split operations
pub type Result<T> = std::result::Result<T, SplitError>;
