//! Split command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{ensure_text, InputSource};
use crate::output::{write_report, JsonFormatter, ReportFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use split_core::{SplitPolicy, Splitter};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// The three policy flags; at most one may be given
#[derive(Debug, Args)]
#[group(id = "policy", multiple = false)]
pub struct PolicyArgs {
    /// Put LINE_COUNT lines in each output file [default: 1000]
    #[arg(
        short = 'l',
        long = "lines",
        value_name = "LINE_COUNT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub line_count: Option<u64>,

    /// Put BYTE_COUNT bytes in each output file (K, M, G suffixes are binary multiples)
    #[arg(short = 'b', long = "bytes", value_name = "BYTE_COUNT[K|M|G]")]
    pub byte_count: Option<String>,

    /// Split the input into CHUNK_COUNT files of equal size
    #[arg(
        short = 'n',
        long = "number",
        value_name = "CHUNK_COUNT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub chunk_count: Option<u64>,
}

impl PolicyArgs {
    /// Pick the single active policy.
    ///
    /// A byte count that does not parse is treated as absent, which leaves
    /// the line-count default in effect.
    pub fn resolve(&self, default_line_count: u64) -> SplitPolicy {
        if let Some(lines) = self.line_count {
            return SplitPolicy::LineCount(lines);
        }
        if let Some(chunks) = self.chunk_count {
            return SplitPolicy::ChunkCount(chunks);
        }
        if let Some(raw) = &self.byte_count {
            let policy = SplitPolicy::byte_count_from_str(raw);
            if !policy.is_default_value() {
                return policy;
            }
            if is_zero_count(raw) {
                log::info!("byte count '{raw}' is zero; treating it as not given");
            } else {
                log::warn!("ignoring malformed byte count '{raw}'");
            }
        }

        SplitPolicy::LineCount(default_line_count)
    }
}

/// A well-formed byte count whose value is zero, such as `0` or `00k`
fn is_zero_count(raw: &str) -> bool {
    let digits = raw
        .strip_suffix(['K', 'k', 'M', 'm', 'G', 'g'])
        .unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b == b'0')
}

/// Report printed after a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// One "creating file" line per output
    Text,
    /// JSON manifest of all outputs
    Json,
}

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Input file; absent or "-" reads standard input
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output file name prefix [default: x]
    #[arg(value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Directory for output files (default: current directory)
    #[arg(long, value_name = "DIR", env = "SPLIT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "FILE", env = "SPLIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print a report of the produced files
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Split the input even if it does not look like text
    #[arg(long)]
    pub allow_binary: bool,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let policy = self.policy.resolve(config.defaults.line_count);
        let prefix = self
            .prefix
            .clone()
            .unwrap_or_else(|| config.output.prefix.clone());
        let output_dir = self.resolve_output_dir(&config)?;

        let source = InputSource::from_arg(self.file.as_deref());
        let mut reader = BufReader::new(source.open()?);
        if !self.allow_binary {
            ensure_text(&mut reader, &source.display_name())?;
        }

        let splitter = Splitter::builder().policy(policy).prefix(prefix).build()?;
        log::info!(
            "Splitting {} ({}) into {}",
            source.display_name(),
            policy,
            output_dir.display()
        );

        let summary = splitter
            .split(reader, &output_dir)
            .with_context(|| format!("cannot split {}", source.display_name()))?;

        log::info!(
            "Wrote {} files ({} bytes)",
            summary.len(),
            summary.total_bytes()
        );

        if let Some(format) = self.report {
            let mut formatter: Box<dyn ReportFormatter> = match format {
                ReportFormat::Text => Box::new(TextFormatter::stdout()),
                ReportFormat::Json => Box::new(JsonFormatter::stdout()),
            };
            write_report(formatter.as_mut(), &output_dir, &summary)?;
        }

        Ok(())
    }

    /// Command line, then config file, then the current directory
    fn resolve_output_dir(&self, config: &CliConfig) -> Result<PathBuf> {
        let dir = self
            .output_dir
            .clone()
            .or_else(|| config.output.directory.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        if !Path::new(&dir).is_dir() {
            return Err(CliError::OutputDirNotFound(dir.display().to_string()).into());
        }

        Ok(dir)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
