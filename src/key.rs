//! Metric key rules: 3 to 255 characters, `[a-zA-Z_][a-zA-Z0-9._-]*`, no `dt.` prefix.

use crate::error::{ErrorKind, Violation};

pub const MIN_KEY_LEN: usize = 3;
pub const MAX_KEY_LEN: usize = 255;
/// Keys under this prefix are reserved for the ingesting platform.
pub const RESERVED_PREFIX: &str = "dt.";

/// Whether `key` matches `^[a-zA-Z_][a-zA-Z0-9._-]{2,254}$`.
pub fn is_valid_metric_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && (MIN_KEY_LEN..=MAX_KEY_LEN).contains(&bytes.len())
                && rest
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
        }
        None => false,
    }
}

/// Check a metric key. Returns every violation found; both a format problem and the reserved
/// prefix can be reported for the same key.
pub fn validate_metric_key(key: &str) -> Vec<Violation> {
    let mut out = Vec::new();
    if !is_valid_metric_key(key) {
        let len = key.chars().count();
        let violation = if len < MIN_KEY_LEN {
            Violation::new(
                ErrorKind::KeyTooShort,
                format!("Metric key too short ({} < {}): '{}'", len, MIN_KEY_LEN, key),
            )
        } else if len > MAX_KEY_LEN {
            Violation::new(
                ErrorKind::KeyTooLong,
                format!("Metric key too long ({} > {}): '{}'", len, MAX_KEY_LEN, key),
            )
        } else {
            Violation::new(
                ErrorKind::KeyInvalidFormat,
                format!("Invalid metric key format: '{}'", key),
            )
        };
        out.push(violation);
    }
    if key.starts_with(RESERVED_PREFIX) {
        out.push(Violation::new(
            ErrorKind::KeyReservedPrefix,
            format!("Metric key cannot start with '{}': '{}'", RESERVED_PREFIX, key),
        ));
    }
    out
}
