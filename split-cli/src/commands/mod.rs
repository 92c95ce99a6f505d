//! CLI command implementations

use anyhow::Result;
use clap::Parser;

pub mod split;

pub use split::{PolicyArgs, ReportFormat, SplitArgs};

/// Break a file into pieces by lines, bytes or chunk count
#[derive(Debug, Parser)]
#[command(name = "split", version, about, long_about = None)]
#[command(after_help = "Outputs are named PREFIXaa, PREFIXab, ... PREFIXzz (at most 676 files).")]
pub struct Cli {
    #[command(flatten)]
    pub split: SplitArgs,
}

impl Cli {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        self.split.execute()
    }
}
