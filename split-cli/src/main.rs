//! `split` command-line entry point

use clap::Parser;
use split_cli::commands::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("split: {e:#}");
            ExitCode::FAILURE
        }
    }
}
