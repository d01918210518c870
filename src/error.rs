//! Error types: per-line validation findings (plain data) and fatal source errors.

use serde::Serialize;
use std::path::PathBuf;

/// Identifies which protocol rule a line violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Line does not split into 2 or 3 space-separated fields.
    WrongFieldCount,
    /// Metric key shorter than 3 characters.
    KeyTooShort,
    /// Metric key longer than 255 characters.
    KeyTooLong,
    /// Metric key has a bad first character or a character outside `a-zA-Z0-9._-`.
    KeyInvalidFormat,
    /// Metric key starts with the reserved `dt.` prefix.
    KeyReservedPrefix,
    /// Dimension remainder contains no `=`.
    DimensionMissingEquals,
    /// Dimension key outside `[a-z0-9_.:-]{1,100}`.
    DimensionInvalidKey,
    /// Quoted dimension value longer than 250 characters.
    DimensionValueTooLong,
    /// More than 50 distinct dimensions.
    TooManyDimensions,
    PayloadInvalidFormat,
    TimestampInvalidFormat,
    TimestampOutOfRange,
}

impl ErrorKind {
    /// Stable kebab-case identifier used in text output.
    pub fn id(self) -> &'static str {
        match self {
            ErrorKind::WrongFieldCount => "wrong-field-count",
            ErrorKind::KeyTooShort => "key-too-short",
            ErrorKind::KeyTooLong => "key-too-long",
            ErrorKind::KeyInvalidFormat => "key-invalid-format",
            ErrorKind::KeyReservedPrefix => "key-reserved-prefix",
            ErrorKind::DimensionMissingEquals => "dimension-missing-equals",
            ErrorKind::DimensionInvalidKey => "dimension-invalid-key",
            ErrorKind::DimensionValueTooLong => "dimension-value-too-long",
            ErrorKind::TooManyDimensions => "too-many-dimensions",
            ErrorKind::PayloadInvalidFormat => "payload-invalid-format",
            ErrorKind::TimestampInvalidFormat => "timestamp-invalid-format",
            ErrorKind::TimestampOutOfRange => "timestamp-out-of-range",
        }
    }
}

/// A rule violation found by one of the component validators, before it is tied to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ErrorKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Violation {
            kind,
            message: message.into(),
        }
    }

    /// Attach the originating line number.
    pub fn at_line(self, line: usize) -> ValidationError {
        ValidationError {
            input: None,
            line,
            kind: self.kind,
            message: self.message,
        }
    }
}

/// A violation attached to the line (and optionally the named source) it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Line {line}: {message}")]
pub struct ValidationError {
    /// Name of the input the line was read from; `None` for lines validated in isolation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub line: usize,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// Fatal conditions for an input source. These stop the run, unlike per-line errors.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source unavailable: {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read failed: {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
