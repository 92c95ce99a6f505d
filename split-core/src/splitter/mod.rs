//! Policy dispatch and per-run output bookkeeping

mod bytes;
mod chunks;
mod lines;

pub use bytes::buffer_size;

use crate::error::{Result, SplitError};
use crate::namer::{OutputNamer, MAX_OUTPUTS};
use crate::policy::{defaults, SplitPolicy};
use crate::sink::{FileSinks, Sink, SinkProvider};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One output produced by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Output name (`prefix` + suffix)
    pub name: String,
    /// Bytes written
    pub bytes: u64,
}

/// What a run produced, in suffix order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSummary {
    /// Produced outputs
    pub files: Vec<OutputFile>,
}

impl SplitSummary {
    /// Number of outputs
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the run produced nothing
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of all output sizes
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }

    /// Output names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }
}

/// Splits one input stream into `prefix`-named outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splitter {
    policy: SplitPolicy,
    prefix: String,
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(SplitPolicy::default(), defaults::PREFIX)
    }
}

impl Splitter {
    /// Create a splitter for `policy` writing `prefix`-named outputs
    pub fn new(policy: SplitPolicy, prefix: impl Into<String>) -> Self {
        Self {
            policy,
            prefix: prefix.into(),
        }
    }

    /// Create a splitter builder
    pub fn builder() -> SplitterBuilder {
        SplitterBuilder::default()
    }

    /// Active policy
    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    /// Output prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Split `input` into files under `output_dir`
    pub fn split<R: Read>(&self, input: R, output_dir: impl AsRef<Path>) -> Result<SplitSummary> {
        self.split_into(input, FileSinks::new(output_dir))
    }

    /// Split `input` into sinks obtained from `sinks`.
    ///
    /// The input is consumed once, front to back. On
    /// [`SplitError::TooManyOutputs`] every output this call produced has
    /// already been deleted; on an I/O error outputs closed before the
    /// failure are left in place.
    pub fn split_into<R: Read, P: SinkProvider>(
        &self,
        input: R,
        sinks: P,
    ) -> Result<SplitSummary> {
        self.policy.validate()?;

        log::debug!("splitting with {} into '{}'*", self.policy, self.prefix);

        let mut reader = BufReader::new(input);
        let mut run = Run::new(&self.prefix, sinks);

        match self.policy {
            SplitPolicy::LineCount(n) => lines::split_lines(&mut reader, &mut run, n)?,
            SplitPolicy::ByteCount(n) => bytes::split_bytes(&mut reader, &mut run, n)?,
            SplitPolicy::ChunkCount(n) => chunks::split_chunks(&mut reader, &mut run, n)?,
        }

        let summary = run.finish();
        log::debug!(
            "produced {} outputs ({} bytes)",
            summary.len(),
            summary.total_bytes()
        );
        Ok(summary)
    }
}

/// Fluent builder for [`Splitter`]
#[derive(Debug, Default)]
pub struct SplitterBuilder {
    policy: Option<SplitPolicy>,
    prefix: Option<String>,
}

impl SplitterBuilder {
    /// Create a builder with default policy and prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy
    pub fn policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the output prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Build the splitter, rejecting policies no algorithm can run
    pub fn build(self) -> Result<Splitter> {
        let policy = self.policy.unwrap_or_default();
        policy.validate()?;

        Ok(Splitter::new(
            policy,
            self.prefix.unwrap_or_else(|| defaults::PREFIX.to_string()),
        ))
    }
}

/// An output currently open for writing
pub(crate) struct OpenOutput<S> {
    name: String,
    sink: S,
    written: u64,
}

impl<S: Sink> OpenOutput<S> {
    pub(crate) fn write(&mut self, buf: &[u8]) -> Result<()> {
        self.sink.write(buf).map_err(|source| SplitError::Write {
            name: self.name.clone(),
            source,
        })?;
        self.written += buf.len() as u64;
        Ok(())
    }
}

/// Naming and cleanup state for one split call
pub(crate) struct Run<'a, P> {
    prefix: &'a str,
    namer: OutputNamer,
    sinks: P,
    produced: Vec<OutputFile>,
}

impl<'a, P: SinkProvider> Run<'a, P> {
    fn new(prefix: &'a str, sinks: P) -> Self {
        Self {
            prefix,
            namer: OutputNamer::new(),
            sinks,
            produced: Vec::new(),
        }
    }

    /// No suffix left for another output
    pub(crate) fn exhausted(&self) -> bool {
        self.namer.exhausted()
    }

    /// Create the output for the current suffix
    pub(crate) fn open(&mut self) -> Result<OpenOutput<P::Sink>> {
        let name = self.namer.file_name(self.prefix);
        log::debug!("creating {name}");

        let sink = self
            .sinks
            .create(&name)
            .map_err(|source| SplitError::Create {
                name: name.clone(),
                source,
            })?;

        Ok(OpenOutput {
            name,
            sink,
            written: 0,
        })
    }

    /// Close a finished output and move to the next suffix
    pub(crate) fn commit(&mut self, output: OpenOutput<P::Sink>) -> Result<()> {
        let OpenOutput {
            name,
            sink,
            written,
        } = output;

        sink.close().map_err(|source| SplitError::Close {
            name: name.clone(),
            source,
        })?;

        self.produced.push(OutputFile {
            name,
            bytes: written,
        });
        self.namer.advance();
        Ok(())
    }

    /// Close and remove an output that received nothing
    pub(crate) fn discard(&mut self, output: OpenOutput<P::Sink>) -> Result<()> {
        let OpenOutput { name, sink, .. } = output;

        sink.close().map_err(|source| SplitError::Close {
            name: name.clone(),
            source,
        })?;
        self.delete(&name)
    }

    /// Remove everything this run produced and report exhaustion.
    ///
    /// A failed delete does not stop the cleanup; it is logged and the
    /// remaining outputs are still removed.
    pub(crate) fn abort_exhausted(&mut self) -> SplitError {
        log::warn!(
            "suffix space exhausted; removing {} outputs",
            self.produced.len()
        );

        let produced = std::mem::take(&mut self.produced);
        for output in &produced {
            if let Err(e) = self.delete(&output.name) {
                log::warn!("{e}");
            }
        }

        SplitError::TooManyOutputs { limit: MAX_OUTPUTS }
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.sinks.delete(name).map_err(|source| SplitError::Delete {
            name: name.to_string(),
            source,
        })
    }

    fn finish(self) -> SplitSummary {
        SplitSummary {
            files: self.produced,
        }
    }
}

/// Whether `input` still holds unread bytes
pub(crate) fn has_remaining<R: BufRead>(input: &mut R) -> Result<bool> {
    let buf = input.fill_buf().map_err(SplitError::Read)?;
    Ok(!buf.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySinks, SinkEvent};
    use std::io::{self, Cursor};

    fn split_in_memory(policy: SplitPolicy, input: &[u8]) -> (Result<SplitSummary>, MemorySinks) {
        let sinks = MemorySinks::new();
        let result = Splitter::new(policy, "x").split_into(Cursor::new(input.to_vec()), sinks.clone());
        (result, sinks)
    }

    /// Reader that fails once its data has been handed out
    struct FailingReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
            }
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Provider whose sinks reject writes to one name
    struct RejectingSinks {
        inner: MemorySinks,
        reject: &'static str,
    }

    struct RejectingSink {
        inner: crate::sink::MemorySink,
        reject: bool,
    }

    impl Sink for RejectingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<()> {
            if self.reject {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
            }
            self.inner.write(buf)
        }

        fn close(self) -> io::Result<()> {
            self.inner.close()
        }
    }

    impl SinkProvider for RejectingSinks {
        type Sink = RejectingSink;

        fn create(&mut self, name: &str) -> io::Result<RejectingSink> {
            Ok(RejectingSink {
                inner: self.inner.create(name)?,
                reject: name == self.reject,
            })
        }

        fn delete(&mut self, name: &str) -> io::Result<()> {
            self.inner.delete(name)
        }
    }

    #[test]
    fn test_dispatch_line_count() {
        let (result, sinks) = split_in_memory(SplitPolicy::LineCount(1), b"Line1\nLine2\n");
        let summary = result.unwrap();

        assert_eq!(summary.names().collect::<Vec<_>>(), vec!["xaa", "xab"]);
        assert_eq!(sinks.get("xaa").unwrap(), b"Line1\n");
        assert_eq!(sinks.get("xab").unwrap(), b"Line2\n");
    }

    #[test]
    fn test_dispatch_byte_count() {
        let (result, sinks) = split_in_memory(SplitPolicy::ByteCount(5), b"Hi,HowAreYou");
        let summary = result.unwrap();

        assert_eq!(summary.len(), 3);
        assert_eq!(summary.total_bytes(), 12);
        assert_eq!(sinks.get("xaa").unwrap(), b"Hi,Ho");
        assert_eq!(sinks.get("xab").unwrap(), b"wAreY");
        assert_eq!(sinks.get("xac").unwrap(), b"ou");
    }

    #[test]
    fn test_dispatch_chunk_count() {
        let (result, sinks) = split_in_memory(SplitPolicy::ChunkCount(4), b"HogeHogeHugaHuga");
        let summary = result.unwrap();

        assert_eq!(summary.len(), 4);
        for (name, expected) in [("xaa", "Hoge"), ("xab", "Hoge"), ("xac", "Huga"), ("xad", "Huga")] {
            assert_eq!(sinks.get(name).unwrap(), expected.as_bytes());
        }
    }

    #[test]
    fn test_zero_counts_rejected_before_any_output() {
        for policy in [SplitPolicy::LineCount(0), SplitPolicy::ChunkCount(0)] {
            let (result, sinks) = split_in_memory(policy, b"data\n");
            assert!(matches!(result, Err(SplitError::InvalidPolicy(_))));
            assert!(sinks.events().is_empty());
        }
    }

    #[test]
    fn test_builder_defaults() {
        let splitter = Splitter::builder().build().unwrap();
        assert_eq!(splitter.policy(), SplitPolicy::LineCount(1000));
        assert_eq!(splitter.prefix(), "x");
        assert_eq!(splitter, Splitter::default());
    }

    #[test]
    fn test_builder_custom() {
        let splitter = Splitter::builder()
            .policy(SplitPolicy::ByteCount(10))
            .prefix("part-")
            .build()
            .unwrap();
        assert_eq!(splitter.policy(), SplitPolicy::ByteCount(10));
        assert_eq!(splitter.prefix(), "part-");
    }

    #[test]
    fn test_builder_rejects_zero_line_count() {
        let result = Splitter::builder().policy(SplitPolicy::LineCount(0)).build();
        assert!(matches!(result, Err(SplitError::InvalidPolicy(_))));
    }

    #[test]
    fn test_read_error_is_fatal_and_keeps_closed_outputs() {
        let sinks = MemorySinks::new();
        let reader = FailingReader {
            data: b"Line1\nLine2\nLine3".to_vec(),
            pos: 0,
        };

        let result = Splitter::new(SplitPolicy::LineCount(1), "x").split_into(reader, sinks.clone());

        assert!(matches!(result, Err(SplitError::Read(_))));
        // Completed outputs stay in place
        assert_eq!(sinks.get("xaa").unwrap(), b"Line1\n");
        assert_eq!(sinks.get("xab").unwrap(), b"Line2\n");
    }

    #[test]
    fn test_write_error_names_the_output() {
        let inner = MemorySinks::new();
        let sinks = RejectingSinks {
            inner: inner.clone(),
            reject: "xab",
        };

        let result = Splitter::new(SplitPolicy::ByteCount(2), "x")
            .split_into(Cursor::new(b"aabbcc".to_vec()), sinks);

        match result {
            Err(SplitError::Write { name, .. }) => assert_eq!(name, "xab"),
            other => panic!("expected write error, got {other:?}"),
        }
        assert_eq!(inner.get("xaa").unwrap(), b"aa");
        assert!(inner.get("xac").is_none());
    }

    /// Provider that refuses to delete one name
    struct StickySinks {
        inner: MemorySinks,
        sticky: &'static str,
    }

    impl SinkProvider for StickySinks {
        type Sink = crate::sink::MemorySink;

        fn create(&mut self, name: &str) -> io::Result<Self::Sink> {
            self.inner.create(name)
        }

        fn delete(&mut self, name: &str) -> io::Result<()> {
            if name == self.sticky {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.inner.delete(name)
        }
    }

    #[test]
    fn test_exhaustion_cleanup_continues_past_failed_delete() {
        let inner = MemorySinks::new();
        let sinks = StickySinks {
            inner: inner.clone(),
            sticky: "xab",
        };
        let input = "l\n".repeat(MAX_OUTPUTS + 1);

        let result = Splitter::new(SplitPolicy::LineCount(1), "x")
            .split_into(Cursor::new(input.into_bytes()), sinks);

        assert!(matches!(
            result,
            Err(SplitError::TooManyOutputs { limit: MAX_OUTPUTS })
        ));
        assert!(result.unwrap_err().is_recoverable());
        // Only the undeletable output is left behind
        assert_eq!(inner.names(), vec!["xab"]);
    }

    #[test]
    fn test_split_accepts_provider_by_reference() {
        let mut sinks = MemorySinks::new();
        Splitter::new(SplitPolicy::LineCount(10), "x")
            .split_into(Cursor::new(b"one\n".to_vec()), &mut sinks)
            .unwrap();

        assert_eq!(
            sinks.events(),
            vec![
                SinkEvent::Created("xaa".into()),
                SinkEvent::Closed("xaa".into()),
            ]
        );
    }

    #[test]
    fn test_has_remaining() {
        let mut empty = Cursor::new(Vec::<u8>::new());
        assert!(!has_remaining(&mut empty).unwrap());

        let mut data = Cursor::new(b"x".to_vec());
        assert!(has_remaining(&mut data).unwrap());
        // Peeking does not consume
        assert!(has_remaining(&mut data).unwrap());
    }
}
