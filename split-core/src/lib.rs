//! Split execution engine
//!
//! Partitions one input byte stream into a bounded sequence of outputs
//! named `<prefix><suffix>`, where the suffix runs from `aa` to `zz`.
//! Three mutually exclusive policies pick the algorithm:
//!
//! - [`SplitPolicy::LineCount`]: at most `n` lines per output
//! - [`SplitPolicy::ByteCount`]: `n` bytes per output, the last one shorter
//! - [`SplitPolicy::ChunkCount`]: `n` outputs of equal size, the last
//!   absorbing the remainder
//!
//! Outputs go through a [`SinkProvider`], so the same algorithms write to
//! the file system ([`FileSinks`]) or to memory ([`MemorySinks`]).
//!
//! # Example
//!
//! ```rust
//! use split_core::{MemorySinks, SplitPolicy, Splitter};
//!
//! let sinks = MemorySinks::new();
//! let splitter = Splitter::new(SplitPolicy::ByteCount(5), "x");
//!
//! let summary = splitter
//!     .split_into(&b"Hi,HowAreYou"[..], sinks.clone())
//!     .unwrap();
//!
//! assert_eq!(summary.names().collect::<Vec<_>>(), vec!["xaa", "xab", "xac"]);
//! assert_eq!(sinks.get("xac").unwrap(), b"ou");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod namer;
pub mod policy;
pub mod sink;
pub mod splitter;

pub use error::{Result, SplitError};
pub use namer::{OutputNamer, MAX_OUTPUTS};
pub use policy::{defaults, parse_byte_count, SplitPolicy};
pub use sink::{FileSinks, MemorySinks, Sink, SinkEvent, SinkProvider};
pub use splitter::{buffer_size, OutputFile, SplitSummary, Splitter, SplitterBuilder};
