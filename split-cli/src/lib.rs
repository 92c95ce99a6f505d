//! Split CLI library
//!
//! Argument handling, configuration, input opening and run reporting for
//! the `split` binary. The splitting itself lives in `split-core`.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
