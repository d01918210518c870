//! Validator configuration.

use time::OffsetDateTime;

/// Settings that change how lines are judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Reference time in epoch milliseconds for the timestamp freshness window.
    /// `None` disables the freshness check (format is still checked).
    pub now_ms: Option<i64>,
}

impl ValidatorConfig {
    /// Freshness checked against the current wall clock.
    pub fn now() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        ValidatorConfig {
            now_ms: Some((nanos / 1_000_000) as i64),
        }
    }

    /// Freshness checked against a fixed reference time.
    pub fn at(now_ms: i64) -> Self {
        ValidatorConfig { now_ms: Some(now_ms) }
    }

    pub fn without_timestamp_check() -> Self {
        ValidatorConfig { now_ms: None }
    }
}
