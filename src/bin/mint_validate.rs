//! Validate MINT line protocol output.
//!
//! Usage:
//!   mint_validate [OPTIONS] [FILE ...]
//!   cat payload.txt | mint_validate
//!
//! Reads each file (or stdin when no file or `-` is given) line by line, validates every line
//! and prints a summary. Exit code 1 if any line is invalid, if a file cannot be opened, or
//! (with --strict-completeness) if a gateway is missing expected metrics.
//!
//! Logging goes to stderr and is controlled by `MINT_LOG` (e.g. `MINT_LOG=debug`).

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mintcheck::render::{format_line, format_summary, write_json};
use mintcheck::{validate_sources, Report, Source, SourceError, Validator, ValidatorConfig};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "mint_validate",
    version,
    about = "Validate Dynatrace MINT line protocol output"
)]
struct Cli {
    /// Files to validate (`-` for stdin).
    #[arg(default_value = "-")]
    files: Vec<String>,

    /// Show each line and its parse result.
    #[arg(short, long)]
    verbose: bool,

    /// Verify all expected metrics appear for each gateway.
    #[arg(long)]
    check_completeness: bool,

    /// Treat completeness issues as failure (implies --check-completeness).
    #[arg(long)]
    strict_completeness: bool,

    /// Skip timestamp range validation.
    #[arg(long, conflicts_with = "now")]
    no_timestamp_check: bool,

    /// Reference time in epoch milliseconds for the timestamp range check (default: now).
    #[arg(long, value_name = "MS")]
    now: Option<i64>,

    /// Summary output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn validator_config(&self) -> ValidatorConfig {
        if self.no_timestamp_check {
            ValidatorConfig::without_timestamp_check()
        } else if let Some(now) = self.now {
            ValidatorConfig::at(now)
        } else {
            ValidatorConfig::now()
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let validator = Validator::new(cli.validator_config());
    let sources: Vec<Source> = cli.files.iter().map(|f| Source::from_arg(f)).collect();
    let mut report = Report::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_err: Option<io::Error> = None;
    let result = validate_sources(&validator, &sources, &mut report, |_, line, outcome| {
        if !cli.verbose || write_err.is_some() {
            return;
        }
        if let Some(text) = format_line(line, outcome) {
            if let Err(e) = writeln!(out, "{}", text) {
                write_err = Some(e);
            }
        }
    });
    if let Some(e) = write_err {
        return Err(e).context("writing verbose output");
    }
    match result {
        Ok(()) => {}
        Err(e @ SourceError::Unavailable { .. }) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("validating input"),
    }

    if cli.check_completeness || cli.strict_completeness {
        report.check_completeness();
    }

    tracing::info!(
        lines = report.lines_read(),
        valid = report.valid,
        invalid = report.invalid,
        skipped = report.skipped,
        "validation finished"
    );

    match cli.format {
        OutputFormat::Text => {
            let text = format_summary(&report, sources.len() > 1);
            out.write_all(text.as_bytes()).context("writing summary")?;
        }
        OutputFormat::Json => write_json(&report, &mut out).context("writing report")?,
    }
    out.flush().context("flushing output")?;

    let ok = if cli.strict_completeness {
        report.is_strict_success()
    } else {
        report.is_success()
    };
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
