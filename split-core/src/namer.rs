//! Output suffix generation (`aa`, `ab`, ..., `zz`)

use crate::policy::defaults::SUFFIX_LENGTH;

/// Number of distinct suffixes, and so the most outputs one run can produce
pub const MAX_OUTPUTS: usize = 26usize.pow(SUFFIX_LENGTH as u32);

/// Base-26 suffix counter owned by a single split run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNamer {
    suffix: [u8; SUFFIX_LENGTH],
    exhausted: bool,
}

impl Default for OutputNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputNamer {
    /// Start at `aa`
    pub fn new() -> Self {
        Self {
            suffix: [b'a'; SUFFIX_LENGTH],
            exhausted: false,
        }
    }

    /// The current suffix
    pub fn next(&self) -> String {
        self.suffix.iter().map(|&b| char::from(b)).collect()
    }

    /// `prefix` followed by the current suffix
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.next())
    }

    /// Step to the following suffix, carrying from the last character.
    ///
    /// Advancing past `zz` marks the namer exhausted; the suffix itself is
    /// left at `zz`.
    pub fn advance(&mut self) {
        if self.exhausted {
            return;
        }

        for ch in self.suffix.iter_mut().rev() {
            if *ch < b'z' {
                *ch += 1;
                return;
            }
            *ch = b'a';
        }

        self.suffix = [b'z'; SUFFIX_LENGTH];
        self.exhausted = true;
    }

    /// True once every suffix has been handed out
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Every name this namer can generate for `prefix`, in order
    pub fn all_names(prefix: &str) -> impl Iterator<Item = String> + '_ {
        let mut namer = OutputNamer::new();
        std::iter::from_fn(move || {
            if namer.exhausted() {
                return None;
            }
            let name = namer.file_name(prefix);
            namer.advance();
            Some(name)
        })
    }
}
