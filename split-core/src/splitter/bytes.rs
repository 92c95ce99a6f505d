//! Byte-count splitting

use super::{has_remaining, OpenOutput, Run};
use crate::error::{Result, SplitError};
use crate::sink::{Sink, SinkProvider};
use std::io::{self, BufRead, Read};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Read buffer used when the whole input goes into one output
const WHOLE_INPUT_BUFFER: usize = 64 * 1024;

/// Read buffer size for a target of `byte_count` bytes per output.
///
/// | target      | buffer  |
/// |-------------|---------|
/// | > 1 GiB     | 32 MiB  |
/// | > 1 MiB     | 4 MiB   |
/// | > 1 KiB     | 64 KiB  |
/// | otherwise   | 4 KiB   |
///
/// Only throughput depends on this; any size between 1 and `byte_count`
/// produces the same outputs.
pub fn buffer_size(byte_count: u64) -> usize {
    if byte_count > GIB {
        32 * 1024 * 1024
    } else if byte_count > MIB {
        4 * 1024 * 1024
    } else if byte_count > KIB {
        64 * 1024
    } else {
        4 * 1024
    }
}

/// How filling one output ended
#[derive(Debug, PartialEq, Eq)]
enum Fill {
    /// Target reached
    Full,
    /// Input ended after some bytes; this output is the last one
    FinishWrite,
    /// Input ended before any byte
    Exhausted,
}

/// Copy up to `target` bytes from `input` into `output`, one buffer at a time
fn fill_output<R: BufRead, S: Sink>(
    input: &mut R,
    output: &mut OpenOutput<S>,
    target: u64,
    buf: &mut [u8],
) -> Result<Fill> {
    let mut filled = 0u64;

    while filled < target {
        let want = (target - filled).min(buf.len() as u64) as usize;
        let read = match input.read(&mut buf[..want]) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SplitError::Read(e)),
        };

        if read == 0 {
            return Ok(if filled == 0 {
                Fill::Exhausted
            } else {
                Fill::FinishWrite
            });
        }

        output.write(&buf[..read])?;
        filled += read as u64;
    }

    Ok(Fill::Full)
}

/// Write exactly `byte_count` bytes per output, the last one possibly
/// shorter. A count of zero sends the whole input to a single output.
pub(crate) fn split_bytes<R: BufRead, P: SinkProvider>(
    input: &mut R,
    run: &mut Run<'_, P>,
    byte_count: u64,
) -> Result<()> {
    if byte_count == 0 {
        return split_whole(input, run);
    }

    let size = buffer_size(byte_count).min(usize::try_from(byte_count).unwrap_or(usize::MAX));
    log::trace!("byte split of {byte_count} using {size}-byte reads");
    let mut buf = vec![0u8; size];

    loop {
        if run.exhausted() {
            if has_remaining(input)? {
                return Err(run.abort_exhausted());
            }
            return Ok(());
        }

        let mut output = run.open()?;
        match fill_output(input, &mut output, byte_count, &mut buf)? {
            Fill::Full => run.commit(output)?,
            Fill::FinishWrite => {
                run.commit(output)?;
                return Ok(());
            }
            Fill::Exhausted => {
                run.discard(output)?;
                return Ok(());
            }
        }
    }
}

fn split_whole<R: BufRead, P: SinkProvider>(input: &mut R, run: &mut Run<'_, P>) -> Result<()> {
    let mut buf = vec![0u8; WHOLE_INPUT_BUFFER];
    let mut output = run.open()?;

    match fill_output(input, &mut output, u64::MAX, &mut buf)? {
        Fill::Exhausted => run.discard(output),
        Fill::Full | Fill::FinishWrite => run.commit(output),
    }
}
