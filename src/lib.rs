//! # mintcheck: MINT line protocol validator
//!
//! Validates metric lines in the MINT ingestion line protocol and aggregates the results into
//! a report, optionally with a per-gateway completeness check.
//!
//! ## Line format
//!
//! ```text
//! <key>[,<dim>=<val>,...] <payload> [<timestamp>]
//! ```
//!
//! - **key**: 3-255 characters, `[a-zA-Z_][a-zA-Z0-9._-]*`, not starting with `dt.`
//! - **dimensions**: keys `[a-z0-9_.:-]{1,100}`; values unquoted up to the next comma, or
//!   quoted with `\` escapes (at most 250 characters); at most 50 dimensions
//! - **payload**: `gauge,<num>`, `gauge,min=<n>,max=<n>,sum=<n>,count=<u>`,
//!   `count,delta=<n>` or a bare number
//! - **timestamp**: 13-digit UTC epoch milliseconds, within -1h/+10m of now when checked
//!
//! Blank lines and lines starting with `#` are skipped.
//!
//! ## Usage
//!
//! ```
//! use mintcheck::{Report, Validator, ValidatorConfig};
//!
//! let validator = Validator::new(ValidatorConfig::without_timestamp_check());
//! let mut report = Report::new();
//! for (i, line) in ["cpu.load,gateway=gw1 gauge,0.5", "dt.reserved 1"].iter().enumerate() {
//!     report.record(&validator.validate_line(line, i + 1), None);
//! }
//! assert_eq!(report.valid, 1);
//! assert_eq!(report.invalid, 1);
//! ```
//!
//! The `mint_validate` binary wraps this for files and standard input.

pub mod completeness;
pub mod config;
pub mod error;
pub mod key;
pub mod line;
pub mod payload;
pub mod render;
pub mod report;
pub mod scan;
pub mod source;
pub mod timestamp;

pub use completeness::{CompletenessIssue, GatewayMetricSet, MetricFamily};
pub use config::ValidatorConfig;
pub use error::{ErrorKind, SourceError, ValidationError, Violation};
pub use line::{LineOutcome, MetricLine, MetricRecord, Validator};
pub use payload::{classify_payload, PayloadKind};
pub use report::Report;
pub use scan::scan_dimensions;
pub use source::{validate_reader, validate_sources, Source};
