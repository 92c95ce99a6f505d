//! Line-count splitting

use super::{has_remaining, Run};
use crate::error::{Result, SplitError};
use crate::sink::SinkProvider;
use std::io::BufRead;

/// Write at most `max_lines` lines per output.
///
/// A line runs up to and including `\n`, or to the end of the input when
/// the last line has no terminator.
pub(crate) fn split_lines<R: BufRead, P: SinkProvider>(
    input: &mut R,
    run: &mut Run<'_, P>,
    max_lines: u64,
) -> Result<()> {
    let mut line = Vec::new();

    loop {
        if run.exhausted() {
            if has_remaining(input)? {
                return Err(run.abort_exhausted());
            }
            return Ok(());
        }

        let mut output = run.open()?;
        let mut lines = 0u64;

        while lines < max_lines {
            line.clear();
            let read = input.read_until(b'\n', &mut line).map_err(SplitError::Read)?;
            if read == 0 {
                break;
            }
            output.write(&line)?;
            lines += 1;
        }

        if lines == 0 {
            run.discard(output)?;
            return Ok(());
        }

        run.commit(output)?;

        if lines < max_lines {
            // Input ended inside this unit
            return Ok(());
        }
    }
}
