//! Octal escapes for delimiter characters in `ROW FORMAT DELIMITED` clauses.

use crate::error::{DdlError, Result};

/// Largest code the escape grammar reads back as a single byte.
const MAX_ESCAPABLE: u32 = 0o177;

/// Render `code` as a Hive octal escape, e.g. `10` → `\012`.
///
/// Only 7-bit codes are accepted. Hive interprets delimiter escapes as signed
/// bytes, so anything from 128 up is rejected even though it fits in a byte.
pub fn encode_octal_byte(code: u32) -> Result<String> {
    if code > MAX_ESCAPABLE {
        return Err(DdlError::InvalidEscapeCode(code));
    }
    Ok(format!("\\{:03o}", code))
}

/// Escape a delimiter character.
pub fn encode_delimiter(delimiter: char) -> Result<String> {
    encode_octal_byte(u32::from(delimiter))
}
