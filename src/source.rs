//! Input sources: files or standard input, read one line at a time.

use crate::error::SourceError;
use crate::line::{LineOutcome, MetricLine, Validator};
use crate::report::Report;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Name used for standard input in reports.
pub const STDIN_NAME: &str = "<stdin>";

/// A named input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` means standard input, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    pub fn name(&self) -> String {
        match self {
            Source::Stdin => STDIN_NAME.to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    /// Open the source for buffered reading. A file that cannot be opened is fatal.
    pub fn open(&self) -> Result<Box<dyn BufRead>, SourceError> {
        match self {
            Source::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            Source::File(path) => open_file(path),
        }
    }
}

fn open_file(path: &Path) -> Result<Box<dyn BufRead>, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Validate every line of `reader`, feeding outcomes into `report`.
///
/// Lines are numbered from 1. `on_line` sees each line together with its outcome as soon as it
/// is validated. Bytes that are not UTF-8 are replaced so the line fails validation on its own
/// instead of ending the run. Returns the number of physical lines read.
pub fn validate_reader<R, F>(
    validator: &Validator,
    mut reader: R,
    name: &str,
    report: &mut Report,
    mut on_line: F,
) -> Result<usize, SourceError>
where
    R: BufRead,
    F: FnMut(MetricLine<'_>, &LineOutcome),
{
    tracing::debug!(source = name, "validating source");
    let mut buf = Vec::new();
    let mut number = 0usize;
    let mut invalid = 0usize;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| SourceError::Read {
                name: name.to_string(),
                source,
            })?;
        if n == 0 {
            break;
        }
        number += 1;
        let text = String::from_utf8_lossy(&buf);
        let line = MetricLine::new(&text, number);
        let outcome = validator.validate(line);
        if let LineOutcome::Invalid(errors) = &outcome {
            invalid += 1;
            tracing::trace!(source = name, line = number, errors = errors.len(), "invalid line");
        }
        report.record(&outcome, Some(name));
        on_line(line, &outcome);
    }
    tracing::debug!(source = name, lines = number, invalid, "finished source");
    Ok(number)
}

/// Validate each source in order into one report. Line numbers restart for every source.
///
/// Stops at the first source that cannot be opened or read.
pub fn validate_sources<F>(
    validator: &Validator,
    sources: &[Source],
    report: &mut Report,
    mut on_line: F,
) -> Result<(), SourceError>
where
    F: FnMut(&str, MetricLine<'_>, &LineOutcome),
{
    for source in sources {
        let reader = source.open()?;
        let name = source.name();
        validate_reader(validator, reader, &name, report, |line, outcome| {
            on_line(&name, line, outcome)
        })?;
    }
    Ok(())
}
