//! Line validator: splits one MINT line into fields and runs every check on it.
//!
//! ```text
//! <key>[,<dim>=<val>,...] <payload> [<timestamp>]
//! ```
//!
//! All field checks run even after one of them fails, so a single line can report several
//! problems at once. The only exception is a wrong field count, which is reported alone.

use crate::config::ValidatorConfig;
use crate::error::{ErrorKind, ValidationError, Violation};
use crate::key::validate_metric_key;
use crate::payload::{classify_payload, PayloadKind};
use crate::scan::scan_dimensions;
use crate::timestamp::validate_timestamp;
use std::collections::BTreeMap;

/// At most this many distinct dimensions per line.
pub const MAX_DIMENSIONS: usize = 50;

/// One physical input line and its 1-based number within its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricLine<'a> {
    pub text: &'a str,
    pub number: usize,
}

impl<'a> MetricLine<'a> {
    pub fn new(text: &'a str, number: usize) -> Self {
        MetricLine { text, number }
    }

    /// The line without its trailing `\n` / `\r\n`.
    pub fn content(&self) -> &'a str {
        self.text.trim_end_matches(|c: char| c == '\n' || c == '\r')
    }

    /// Blank lines and `#` comment/metadata lines carry no data.
    pub fn is_skippable(&self) -> bool {
        let trimmed = self.content().trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    }
}

/// The metric identity (and value) of a valid line.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub key: String,
    pub dimensions: BTreeMap<String, String>,
    pub payload: PayloadKind,
    pub timestamp: Option<i64>,
}

impl MetricRecord {
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }
}

/// Result of validating one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Valid(MetricRecord),
    /// Never empty.
    Invalid(Vec<ValidationError>),
    Skipped,
}

impl LineOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, LineOutcome::Valid(_))
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            LineOutcome::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

/// Validates lines against one configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Validator { config }
    }

    /// Validate one line.
    pub fn validate(&self, line: MetricLine<'_>) -> LineOutcome {
        if line.is_skippable() {
            return LineOutcome::Skipped;
        }
        let number = line.number;
        let fields: Vec<&str> = line.content().trim().split(' ').collect();
        if !(2..=3).contains(&fields.len()) {
            return LineOutcome::Invalid(vec![Violation::new(
                ErrorKind::WrongFieldCount,
                format!("Expected 2-3 space-separated parts, got {}", fields.len()),
            )
            .at_line(number)]);
        }

        let (key, dims) = match fields[0].split_once(',') {
            Some((key, dims)) => (key, dims),
            None => (fields[0], ""),
        };

        let mut violations = validate_metric_key(key);

        let scanned = scan_dimensions(dims);
        violations.extend(scanned.violations);
        if scanned.dimensions.len() > MAX_DIMENSIONS {
            violations.push(Violation::new(
                ErrorKind::TooManyDimensions,
                format!(
                    "Too many dimensions ({} > {})",
                    scanned.dimensions.len(),
                    MAX_DIMENSIONS
                ),
            ));
        }

        let payload = match classify_payload(fields[1]) {
            Ok(payload) => Some(payload),
            Err(v) => {
                violations.push(v);
                None
            }
        };

        let mut timestamp = None;
        if let Some(token) = fields.get(2) {
            match validate_timestamp(token, self.config.now_ms) {
                Ok(ts) => timestamp = Some(ts),
                Err(v) => violations.push(v),
            }
        }

        match payload {
            Some(payload) if violations.is_empty() => LineOutcome::Valid(MetricRecord {
                key: key.to_string(),
                dimensions: scanned.dimensions,
                payload,
                timestamp,
            }),
            _ => LineOutcome::Invalid(violations.into_iter().map(|v| v.at_line(number)).collect()),
        }
    }

    /// Validate a line given as text and number.
    pub fn validate_line(&self, text: &str, number: usize) -> LineOutcome {
        self.validate(MetricLine::new(text, number))
    }
}
