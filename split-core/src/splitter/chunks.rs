//! Chunk-count splitting

use super::Run;
use crate::error::{Result, SplitError};
use crate::namer::MAX_OUTPUTS;
use crate::sink::SinkProvider;
use std::io::{BufRead, Read};
use std::ops::Range;

/// Byte ranges of `chunks` pieces over `len` bytes.
///
/// Every piece spans `len / chunks` bytes except the last, which runs to
/// `len` and so absorbs the remainder. `chunk_size` must be non-zero.
fn chunk_ranges(len: usize, chunks: u64, chunk_size: usize) -> impl Iterator<Item = Range<usize>> {
    (0..chunks).map(move |index| {
        let start = index as usize * chunk_size;
        let end = if index == chunks - 1 {
            len
        } else {
            start + chunk_size
        };
        start..end
    })
}

/// Read the whole input and write it as `chunks` near-equal outputs
pub(crate) fn split_chunks<R: BufRead, P: SinkProvider>(
    input: &mut R,
    run: &mut Run<'_, P>,
    chunks: u64,
) -> Result<()> {
    let mut content = Vec::new();
    input.read_to_end(&mut content).map_err(SplitError::Read)?;

    let len = content.len();
    let chunk_size = len as u64 / chunks;
    if chunk_size == 0 {
        return Err(SplitError::ZeroChunkSize { len, chunks });
    }
    if chunks > MAX_OUTPUTS as u64 {
        return Err(SplitError::TooManyOutputs { limit: MAX_OUTPUTS });
    }

    log::trace!("{len} bytes into {chunks} chunks of {chunk_size}");

    // chunk_size <= len, so it fits in usize
    for range in chunk_ranges(len, chunks, chunk_size as usize) {
        let mut output = run.open()?;
        let chunk = &content[range];

        if chunk.is_empty() {
            run.discard(output)?;
            return Ok(());
        }

        output.write(chunk)?;
        run.commit(output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySinks;
    use crate::{SplitPolicy, SplitSummary, Splitter};
    use std::io::Cursor;

    fn split(chunks: u64, input: &[u8]) -> (crate::Result<SplitSummary>, MemorySinks) {
        let sinks = MemorySinks::new();
        let result = Splitter::new(SplitPolicy::ChunkCount(chunks), "x")
            .split_into(Cursor::new(input.to_vec()), sinks.clone());
        (result, sinks)
    }

    #[test]
    fn test_chunk_ranges_even() {
        let ranges: Vec<_> = chunk_ranges(16, 4, 4).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..12, 12..16]);
    }

    #[test]
    fn test_chunk_ranges_remainder_goes_last() {
        let ranges: Vec<_> = chunk_ranges(10, 3, 3).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_equal_chunks() {
        let (result, sinks) = split(4, b"HogeHogeHugaHuga");
        result.unwrap();

        assert_eq!(sinks.names(), vec!["xaa", "xab", "xac", "xad"]);
        assert_eq!(sinks.get("xaa").unwrap(), b"Hoge");
        assert_eq!(sinks.get("xad").unwrap(), b"Huga");
    }

    #[test]
    fn test_last_chunk_absorbs_remainder() {
        let (result, sinks) = split(3, b"abcdefghij");
        let summary = result.unwrap();

        let sizes: Vec<u64> = summary.files.iter().map(|f| f.bytes).collect();
        assert_eq!(sizes, vec![3, 3, 4]);
        assert_eq!(sinks.get("xac").unwrap(), b"ghij");
    }

    #[test]
    fn test_single_chunk() {
        let (result, sinks) = split(1, b"hello\n");
        assert_eq!(result.unwrap().len(), 1);
        assert_eq!(sinks.get("xaa").unwrap(), b"hello\n");
    }

    #[test]
    fn test_more_chunks_than_bytes() {
        let (result, sinks) = split(100, b"hello\n");
        match result {
            Err(SplitError::ZeroChunkSize { len, chunks }) => {
                assert_eq!(len, 6);
                assert_eq!(chunks, 100);
            }
            other => panic!("expected ZeroChunkSize, got {other:?}"),
        }
        assert!(sinks.events().is_empty());
    }

    #[test]
    fn test_empty_input_is_zero_chunk_size() {
        let (result, sinks) = split(1, b"");
        assert!(matches!(result, Err(SplitError::ZeroChunkSize { len: 0, .. })));
        assert!(sinks.events().is_empty());
    }

    #[test]
    fn test_too_many_chunks_creates_nothing() {
        let data = vec![b'a'; 1000];
        let (result, sinks) = split(677, &data);
        assert!(matches!(result, Err(SplitError::TooManyOutputs { limit: 676 })));
        assert!(sinks.events().is_empty());
    }

    #[test]
    fn test_max_chunks_succeeds() {
        let data = vec![b'a'; 1000];
        let (result, sinks) = split(676, &data);

        let summary = result.unwrap();
        assert_eq!(summary.len(), 676);
        assert_eq!(summary.total_bytes(), 1000);
        assert_eq!(sinks.get("xzz").unwrap().len(), 1000 - 675);
    }
}
