//! Timestamp field: 13-digit UTC epoch milliseconds, optionally checked for freshness.

use crate::error::{ErrorKind, Violation};

pub const TIMESTAMP_DIGITS: usize = 13;
/// How far in the past a timestamp may lie (1 hour).
pub const MAX_AGE_MS: i64 = 3_600_000;
/// How far in the future a timestamp may lie (10 minutes).
pub const MAX_SKEW_MS: i64 = 600_000;

/// Validate a timestamp token. `now_ms` is the reference time; `None` checks the format only.
pub fn validate_timestamp(token: &str, now_ms: Option<i64>) -> Result<i64, Violation> {
    let well_formed = token.len() == TIMESTAMP_DIGITS && token.bytes().all(|b| b.is_ascii_digit());
    let ts = match token.parse::<i64>() {
        Ok(ts) if well_formed => ts,
        _ => {
            return Err(Violation::new(
                ErrorKind::TimestampInvalidFormat,
                format!(
                    "Invalid timestamp format (expected {}-digit ms): '{}'",
                    TIMESTAMP_DIGITS, token
                ),
            ))
        }
    };
    if let Some(now) = now_ms {
        let earliest = now.saturating_sub(MAX_AGE_MS);
        let latest = now.saturating_add(MAX_SKEW_MS);
        if ts < earliest || ts > latest {
            return Err(Violation::new(
                ErrorKind::TimestampOutOfRange,
                format!(
                    "Timestamp out of range (must be within -1h/+10m of now): {}",
                    token
                ),
            ));
        }
    }
    Ok(ts)
}
