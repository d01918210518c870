//! Dimension scanner: splits `key=value,key="quoted, value",...` into a map.
//!
//! The scanner walks the dimension substring with an explicit byte cursor and three states:
//! before a key, inside an unquoted value, inside a quoted value. A backslash escapes the
//! following character in both value forms; escapes are kept as written (not decoded).
//!
//! Problems are collected as [`Violation`]s and scanning carries on, except when no `=` is
//! left in the remainder: then the rest of the string cannot be split into pairs and the scan
//! stops there.

use crate::error::{ErrorKind, Violation};
use std::collections::BTreeMap;

/// Maximum length of a dimension key, in characters.
pub const MAX_DIMENSION_KEY_LEN: usize = 100;
/// Maximum length of a quoted dimension value, in characters.
pub const MAX_DIMENSION_VALUE_LEN: usize = 250;

/// Result of scanning one dimension substring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScannedDimensions {
    /// Dimension key to raw value. A repeated key keeps its last value.
    pub dimensions: BTreeMap<String, String>,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeKey,
    Unquoted,
    Quoted,
}

/// `^[a-z0-9_.:-]{1,100}$`
pub fn is_valid_dimension_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_DIMENSION_KEY_LEN
        && key
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b':'))
}

/// Scan a dimension substring (the text after the first comma of the key token).
pub fn scan_dimensions(input: &str) -> ScannedDimensions {
    let bytes = input.as_bytes();
    let mut out = ScannedDimensions::default();
    let mut state = State::BeforeKey;
    let mut pos = 0usize;
    let mut key: &str = "";
    let mut value_start = 0usize;

    while pos < bytes.len() {
        match state {
            State::BeforeKey => {
                let Some(eq) = input[pos..].find('=').map(|i| pos + i) else {
                    out.violations.push(Violation::new(
                        ErrorKind::DimensionMissingEquals,
                        format!("Missing '=' in dimension at pos {}", pos),
                    ));
                    break;
                };
                key = &input[pos..eq];
                if !is_valid_dimension_key(key) {
                    out.violations.push(Violation::new(
                        ErrorKind::DimensionInvalidKey,
                        format!("Invalid dimension key: '{}'", key),
                    ));
                }
                pos = eq + 1;
                if bytes.get(pos) == Some(&b'"') {
                    pos += 1;
                    state = State::Quoted;
                } else {
                    state = State::Unquoted;
                }
                value_start = pos;
                if pos >= bytes.len() {
                    // `key=` or `key="` at the very end
                    out.dimensions.insert(key.to_string(), String::new());
                }
            }
            State::Unquoted => {
                let end = find_unescaped(bytes, pos, b',');
                out.dimensions
                    .insert(key.to_string(), input[value_start..end].to_string());
                // skip the separating comma, if any
                pos = end + 1;
                state = State::BeforeKey;
            }
            State::Quoted => {
                let end = find_unescaped(bytes, pos, b'"');
                let value = &input[value_start..end];
                let chars = value.chars().count();
                if chars > MAX_DIMENSION_VALUE_LEN {
                    out.violations.push(Violation::new(
                        ErrorKind::DimensionValueTooLong,
                        format!(
                            "Dimension value too long ({} > {}): '{}'",
                            chars, MAX_DIMENSION_VALUE_LEN, key
                        ),
                    ));
                }
                out.dimensions.insert(key.to_string(), value.to_string());
                pos = end + 1;
                if bytes.get(pos) == Some(&b',') {
                    pos += 1;
                }
                state = State::BeforeKey;
            }
        }
    }

    out
}

/// Index of the first `needle` at or after `from` that is not preceded by an escaping
/// backslash, or `bytes.len()` if there is none.
fn find_unescaped(bytes: &[u8], from: usize, needle: u8) -> usize {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == needle => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}
