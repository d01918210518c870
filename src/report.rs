//! Report aggregation over many validated lines.

use crate::completeness::{CompletenessIssue, GatewayMetricSet};
use crate::error::{ErrorKind, ValidationError};
use crate::line::LineOutcome;
use serde::Serialize;
use std::collections::BTreeMap;

/// Running totals and collected errors for one validation run.
///
/// Fed one [`LineOutcome`] at a time through [`Report::record`]; nothing about a line is kept
/// besides its key (for counts and the per-gateway key sets) and its errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Valid plus invalid lines.
    pub total_data_lines: usize,
    pub valid: usize,
    pub invalid: usize,
    pub skipped: usize,
    /// Occurrences of each metric key on valid lines.
    pub metric_keys: BTreeMap<String, usize>,
    /// Every error in encounter order.
    pub errors: Vec<ValidationError>,
    /// Number of errors per kind.
    pub error_counts: BTreeMap<ErrorKind, usize>,
    #[serde(skip)]
    gateways: GatewayMetricSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<Vec<CompletenessIssue>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one line outcome. `input` names the source the line came from, if any.
    pub fn record(&mut self, outcome: &LineOutcome, input: Option<&str>) {
        match outcome {
            LineOutcome::Skipped => self.skipped += 1,
            LineOutcome::Valid(record) => {
                self.total_data_lines += 1;
                self.valid += 1;
                match self.metric_keys.get_mut(&record.key) {
                    Some(count) => *count += 1,
                    None => {
                        self.metric_keys.insert(record.key.clone(), 1);
                    }
                }
                self.gateways.insert(&record.key, &record.dimensions);
            }
            LineOutcome::Invalid(errors) => {
                self.total_data_lines += 1;
                self.invalid += 1;
                for error in errors {
                    *self.error_counts.entry(error.kind).or_insert(0) += 1;
                    let error = match input {
                        Some(name) => error.clone().with_input(name),
                        None => error.clone(),
                    };
                    self.errors.push(error);
                }
            }
        }
    }

    /// Physical lines seen, including skipped ones.
    pub fn lines_read(&self) -> usize {
        self.total_data_lines + self.skipped
    }

    pub fn gateways(&self) -> &GatewayMetricSet {
        &self.gateways
    }

    /// Run the completeness check over everything recorded so far and keep the result in the
    /// report.
    pub fn check_completeness(&mut self) -> &[CompletenessIssue] {
        self.completeness.insert(self.gateways.check())
    }

    /// True when no line was invalid.
    pub fn is_success(&self) -> bool {
        self.invalid == 0
    }

    /// Like [`Report::is_success`], but completeness issues (if checked) also count as failure.
    pub fn is_strict_success(&self) -> bool {
        self.is_success()
            && self
                .completeness
                .as_ref()
                .map_or(true, |issues| issues.is_empty())
    }
}
