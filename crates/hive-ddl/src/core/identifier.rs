//! Identifier validation, back-quoting, and string literal escaping for
//! generated HiveQL.
//!
//! Identifiers (database, table, column and partition names) cannot be bound
//! as parameters, so every name that reaches a statement goes through
//! [`validate_identifier`] first. String literals (paths, partition values,
//! comments) go through [`quote_literal`].

use crate::error::{DdlError, Result};

/// Maximum identifier length accepted in generated statements.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `DdlError::Config` for invalid identifiers with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DdlError::config("Identifier cannot be empty"));
    }

    if name.contains('\0') {
        return Err(DdlError::Config(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(DdlError::Config(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Validate a name that is written into a statement without back-quotes,
/// such as the partition key in `PARTITIONED BY (key STRING)`.
///
/// Only ASCII letters, digits and `_` are accepted.
pub fn validate_bare_identifier(name: &str) -> Result<()> {
    validate_identifier(name)?;

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(DdlError::Config(format!(
            "Identifier {:?} contains {:?}; only letters, digits and '_' are allowed",
            name, bad
        )));
    }

    Ok(())
}

/// Quote a Hive identifier using backticks.
///
/// Escapes backticks by doubling them and wraps in backticks.
/// Validates the identifier before quoting.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_hive("users")?, "`users`");
/// assert_eq!(quote_hive("table`name")?, "`table``name`");
/// ```
pub fn quote_hive(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("`{}`", name.replace('`', "``")))
}

/// Quote a table name, prefixing the database when one is given.
///
/// Returns `` `db`.`table` `` or `` `table` ``.
pub fn qualify_hive(database: Option<&str>, table: &str) -> Result<String> {
    match database {
        Some(db) => Ok(format!("{}.{}", quote_hive(db)?, quote_hive(table)?)),
        None => quote_hive(table),
    }
}

/// Render a single-quoted HiveQL string literal.
///
/// Hive string literals use backslash escapes, so `\` and `'` are escaped
/// with a backslash.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
